use crate::infra::{parse_coordinates, Services, StdoutLauncher};
use clap::Args;
use rentswap::addresses::{AddressDraft, AddressService};
use rentswap::alerts::UserAlert;
use rentswap::config::AppConfig;
use rentswap::error::AppError;
use rentswap::help::HelpCenter;
use rentswap::links::ContactChannel;
use rentswap::listings::{
    categories_for, ListingDraft, ListingRecord, ListingService, ListingType, PropertyType,
    Seller,
};
use rentswap::location::{Coordinates, LocationData, LocationError, LocationService};
use rentswap::store::MemoryDocumentStore;

const DEMO_USER: &str = "demo-user";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Position used when the device location is unavailable (LAT,LON). Defaults to Dubai.
    #[arg(long, value_parser = parse_coordinates)]
    pub(crate) location: Option<Coordinates>,
    /// Skip the help center portion of the demo.
    #[arg(long)]
    pub(crate) skip_help: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let services = Services::from_config(&config)?;

    println!("RentSwap marketplace demo");
    let position = demo_position(&services.location, args.location).await?;
    println!(
        "\nLocation: {:.4}, {:.4}{}",
        position.latitude,
        position.longitude,
        position
            .address
            .as_deref()
            .map(|address| format!(" ({address})"))
            .unwrap_or_default()
    );

    let seller = Seller {
        id: DEMO_USER.to_string(),
        name: "Demo Seller".to_string(),
    };
    let published = publish_listings(&services.listings, &seller, &position)?;
    for record in &published {
        render_listing(record);
    }

    let store_size = services
        .store
        .len(rentswap::store::LISTINGS_COLLECTION)?;
    println!("- {store_size} listings stored");

    manage_addresses(&services.addresses, &position)?;

    if !args.skip_help {
        tour_help_center(&services.help);
    }

    Ok(())
}

async fn demo_position(
    location: &LocationService,
    fallback: Option<Coordinates>,
) -> Result<LocationData, AppError> {
    if let Some(found) = location.current_location().await {
        return Ok(found);
    }
    println!("Device location unavailable; using a fixed position instead.");
    let coordinates = match fallback {
        Some(coordinates) => coordinates,
        None => Coordinates::new(25.2048, 55.2708)?,
    };
    match location.resolve(coordinates).await {
        Ok(resolved) => Ok(resolved),
        Err(LocationError::Geocoding(_)) => Ok(LocationData::from_coordinates(coordinates)),
        Err(err) => Err(err.into()),
    }
}

fn publish_listings(
    service: &ListingService<MemoryDocumentStore>,
    seller: &Seller,
    position: &LocationData,
) -> Result<Vec<ListingRecord>, AppError> {
    println!("\nListing categories");
    for property_type in PropertyType::ordered() {
        println!(
            "- {}: {}",
            property_type.label(),
            categories_for(property_type).join(", ")
        );
    }

    let mut car = ListingDraft::new(ListingType::Rent);
    car.select_property_type(PropertyType::Car);
    car.title = "Toyota Corolla 2021".to_string();
    car.description = "Clean, low mileage, great for city trips.".to_string();
    car.price = "150".to_string();
    car.category = "Sedan".to_string();
    car.add_image("https://cdn.rentswap.app/demo/corolla.jpg");
    car.car.make = "Toyota".to_string();
    car.car.model = "Corolla".to_string();
    car.set_location(Some(position.clone()));

    let mut house = ListingDraft::new(ListingType::Swap);
    house.select_property_type(PropertyType::House);
    house.title = "Two bedroom apartment in Marina".to_string();
    house.description = "Sea view, looking to swap for a villa for the summer.".to_string();
    house.price = "2,500".to_string();
    house.category = "Apartment".to_string();
    house.add_image("https://cdn.rentswap.app/demo/marina.jpg");
    house.house.bedrooms = "2".to_string();
    house.house.bathrooms = "2".to_string();
    house.swap.swap_preferences = "Villa in Jumeirah".to_string();
    house.set_location(Some(position.clone()));

    println!("\nPublishing listings");
    let mut incomplete = car.clone();
    incomplete.images.clear();
    if let Err(err) = service.submit(incomplete, seller) {
        let alert = UserAlert::from(&err);
        println!("- rejected draft without photos -> {}: {}", alert.title, alert.message);
    }

    let records = vec![service.submit(car, seller)?, service.submit(house, seller)?];
    Ok(records)
}

fn render_listing(record: &ListingRecord) {
    let listing = &record.listing;
    println!(
        "- {} [{}] {} | {} {} | {:.2} | created {}",
        record.id.0,
        listing.listing_type().label(),
        listing.title,
        listing.property_type.label(),
        listing.category,
        listing.price,
        record.created_at.format("%Y-%m-%d %H:%M UTC")
    );
}

fn manage_addresses(
    service: &AddressService<MemoryDocumentStore>,
    position: &LocationData,
) -> Result<(), AppError> {
    println!("\nAddress book");
    let mut home = address_draft("Home", "Villa 12, Al Wasl Road");
    home.coordinates = Some(position.coordinates());
    let home = service.add(DEMO_USER, home)?;

    let mut office = address_draft("Office", "Gate Village 4, DIFC");
    office.is_default = true;
    office.coordinates = Some(Coordinates::new(25.2110, 55.2797)?);
    let office = service.add(DEMO_USER, office)?;
    print_book(service)?;

    if let Some(coordinates) = office.coordinates {
        println!(
            "- {} is {:.2} km from {}",
            office.label,
            position.coordinates().distance_km(&coordinates),
            home.label
        );
    }

    service.remove(DEMO_USER, &office.id)?;
    println!("- removed {}", office.label);
    print_book(service)
}

fn address_draft(label: &str, full_address: &str) -> AddressDraft {
    AddressDraft {
        label: label.to_string(),
        full_address: full_address.to_string(),
        city: "Dubai".to_string(),
        phone: "+971 50 123 4567".to_string(),
        ..AddressDraft::default()
    }
}

fn print_book(service: &AddressService<MemoryDocumentStore>) -> Result<(), AppError> {
    for address in service.list(DEMO_USER)? {
        let marker = if address.is_default { " (default)" } else { "" };
        println!("  - {}{}: {}", address.label, marker, address.full_address);
    }
    Ok(())
}

fn tour_help_center(center: &HelpCenter) {
    println!("\nHelp center");
    let catalog = center.catalog();
    println!("- categories: {}", catalog.categories().join(", "));
    for entry in catalog.search("deposit") {
        println!("- Q: {}", entry.question);
    }

    println!("\nSupport channels");
    for channel in ContactChannel::ordered() {
        match center.contact_link(channel) {
            Ok(link) => println!("- {}: {}", channel.label(), link),
            Err(err) => println!("- {}: unavailable ({err})", channel.label()),
        }
    }
    if let Some(alert) = center.contact(ContactChannel::Whatsapp, &StdoutLauncher) {
        println!("{}: {}", alert.title, alert.message);
    }
}
