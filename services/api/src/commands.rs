use crate::infra::{location_service, parse_coordinates, StdoutLauncher};
use clap::Args;
use rentswap::config::AppConfig;
use rentswap::error::AppError;
use rentswap::help::{FaqEntry, HelpCenter, HelpError};
use rentswap::links::ContactChannel;
use rentswap::listings::{
    categories_for, ListingDraft, ListingService, ListingServiceError, ListingType,
    ListingValidationError, PropertyType, Seller,
};
use rentswap::location::{haversine_km, Coordinates, LocationError};
use rentswap::store::{MemoryDocumentStore, StoreError};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ListingCreateArgs {
    /// RENT or SWAP
    #[arg(long = "type", value_parser = parse_listing_type, default_value = "RENT")]
    pub(crate) listing_type: ListingType,
    /// HOUSE or CAR
    #[arg(long, value_parser = parse_property_type)]
    pub(crate) property: PropertyType,
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long, default_value = "")]
    pub(crate) description: String,
    /// Price as typed, e.g. "1,200"
    #[arg(long)]
    pub(crate) price: String,
    #[arg(long)]
    pub(crate) category: String,
    /// Image URI; repeat for several images
    #[arg(long = "image")]
    pub(crate) images: Vec<String>,
    /// Listing position as LAT,LON. Defaults to the device location.
    #[arg(long, value_parser = parse_coordinates)]
    pub(crate) location: Option<Coordinates>,
    #[arg(long, default_value = "cli-user")]
    pub(crate) seller_id: String,
    #[arg(long, default_value = "CLI User")]
    pub(crate) seller_name: String,
    #[arg(long)]
    pub(crate) make: Option<String>,
    #[arg(long)]
    pub(crate) model: Option<String>,
    #[arg(long)]
    pub(crate) year: Option<String>,
    #[arg(long)]
    pub(crate) bedrooms: Option<String>,
    #[arg(long)]
    pub(crate) bathrooms: Option<String>,
    /// daily, weekly, or monthly
    #[arg(long)]
    pub(crate) rental_period: Option<String>,
    #[arg(long)]
    pub(crate) minimum_period: Option<String>,
    #[arg(long)]
    pub(crate) deposit: Option<String>,
    #[arg(long)]
    pub(crate) swap_preferences: Option<String>,
    #[arg(long)]
    pub(crate) swap_value: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DistanceArgs {
    /// Origin as LAT,LON. Defaults to the device location.
    #[arg(long, value_parser = parse_coordinates)]
    pub(crate) from: Option<Coordinates>,
    /// Destination as LAT,LON
    #[arg(long, value_parser = parse_coordinates)]
    pub(crate) to: Coordinates,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FaqArgs {
    /// Case-insensitive text to look for in questions and answers
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Only show one category
    #[arg(long)]
    pub(crate) category: Option<String>,
}

pub(crate) fn parse_listing_type(raw: &str) -> Result<ListingType, String> {
    ListingType::parse(raw).ok_or_else(|| format!("'{raw}' is not RENT or SWAP"))
}

pub(crate) fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    PropertyType::parse(raw).ok_or_else(|| format!("'{raw}' is not HOUSE or CAR"))
}

pub(crate) fn draft_from_args(args: &ListingCreateArgs) -> ListingDraft {
    let mut draft = ListingDraft::new(args.listing_type);
    draft.select_property_type(args.property);
    draft.title = args.title.clone();
    draft.description = args.description.clone();
    draft.price = args.price.clone();
    draft.category = args.category.clone();
    for image in &args.images {
        draft.add_image(image.clone());
    }

    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    draft.car.make = text(&args.make);
    draft.car.model = text(&args.model);
    draft.car.year = text(&args.year);
    draft.house.bedrooms = text(&args.bedrooms);
    draft.house.bathrooms = text(&args.bathrooms);
    draft.rent.rental_period = text(&args.rental_period);
    draft.rent.minimum_rental_period = text(&args.minimum_period);
    draft.rent.security_deposit = text(&args.deposit);
    draft.swap.swap_preferences = text(&args.swap_preferences);
    draft.swap.swap_value = text(&args.swap_value);
    draft.contact.phone = args.phone.clone();
    draft
}

pub(crate) async fn run_listing_create(args: ListingCreateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let location = location_service(&config.location)?;

    let mut draft = draft_from_args(&args);
    let position = match args.location {
        Some(coordinates) => Some(location.resolve(coordinates).await?),
        None => location.current_location().await,
    };
    draft.set_location(position);

    let seller = Seller {
        id: args.seller_id,
        name: args.seller_name,
    };
    let service = ListingService::new(Arc::new(MemoryDocumentStore::new()));
    let record = service.submit(draft, &seller)?;

    let rendered = serde_json::to_string_pretty(&record).map_err(StoreError::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_categories(raw: &str) -> Result<(), AppError> {
    let property_type = PropertyType::parse(raw).ok_or(ListingServiceError::Validation(
        ListingValidationError::MissingPropertyType,
    ))?;
    println!("{} categories:", property_type.label());
    for category in categories_for(property_type) {
        println!("- {category}");
    }
    Ok(())
}

pub(crate) async fn run_current_location() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let location = location_service(&config.location)?;

    match location.current_location().await {
        Some(data) => {
            println!("Latitude:  {:.5}", data.latitude);
            println!("Longitude: {:.5}", data.longitude);
            if let Some(address) = &data.address {
                println!("Address:   {address}");
            }
            Ok(())
        }
        None => Err(LocationError::PermissionDenied.into()),
    }
}

pub(crate) async fn run_distance(args: DistanceArgs) -> Result<(), AppError> {
    let from = match args.from {
        Some(from) => from,
        None => {
            let config = AppConfig::load()?;
            let location = location_service(&config.location)?;
            location
                .current_location()
                .await
                .map(|data| data.coordinates())
                .ok_or(LocationError::PermissionDenied)?
        }
    };
    println!("{:.2} km", haversine_km(from, args.to));
    Ok(())
}

pub(crate) fn filtered_faqs<'a>(center: &'a HelpCenter, args: &FaqArgs) -> Vec<&'a FaqEntry> {
    center
        .catalog()
        .search(args.query.as_deref().unwrap_or_default())
        .into_iter()
        .filter(|entry| match args.category.as_deref() {
            Some(category) => entry.category.eq_ignore_ascii_case(category.trim()),
            None => true,
        })
        .collect()
}

pub(crate) fn run_faqs(args: FaqArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let center = HelpCenter::from_config(&config.support)?;

    let entries = filtered_faqs(&center, &args);
    if entries.is_empty() {
        println!("No help articles match.");
        return Ok(());
    }

    let mut current_category = "";
    for entry in entries {
        if entry.category != current_category {
            println!("\n{}", entry.category);
            current_category = &entry.category;
        }
        println!("  Q: {}", entry.question);
        println!("     {}", entry.answer);
    }
    Ok(())
}

pub(crate) fn run_contact(raw: &str) -> Result<(), AppError> {
    let channel =
        ContactChannel::parse(raw).ok_or_else(|| HelpError::UnknownChannel(raw.to_string()))?;
    let config = AppConfig::load()?;
    let center = HelpCenter::from_config(&config.support)?;

    if let Some(alert) = center.contact(channel, &StdoutLauncher) {
        println!("{}: {}", alert.title, alert.message);
    }
    Ok(())
}
