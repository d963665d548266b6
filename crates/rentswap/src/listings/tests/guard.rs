use super::common::*;
use crate::listings::domain::{
    ListingTerms, ListingType, PropertyDetails, PropertyType, RentalPeriod, Transmission,
};
use crate::listings::form::ListingDraft;
use crate::listings::guard::{ListingValidationError, MAX_IMAGES};

#[test]
fn rent_car_listing_defaults_rental_terms() {
    let listing = guard()
        .listing_from_draft(car_rent_draft(), &seller())
        .expect("draft is valid");

    assert_eq!(listing.listing_type(), ListingType::Rent);
    assert_eq!(listing.property_type, PropertyType::Car);
    assert_eq!(listing.price, 150.0);
    assert_eq!(
        listing.terms,
        ListingTerms::Rent {
            rental_period: RentalPeriod::Daily,
            minimum_rental_period: 1,
            security_deposit: None,
        }
    );
    match listing.details {
        PropertyDetails::Car(car) => {
            assert_eq!(car.make, "Toyota");
            assert!(car.transmission.is_none());
        }
        other => panic!("expected car details, got {other:?}"),
    }
    assert_eq!(listing.seller_id, "user-42");
}

#[test]
fn swap_house_listing_ignores_rent_and_car_inputs() {
    let listing = guard()
        .listing_from_draft(house_swap_draft(), &seller())
        .expect("draft is valid");

    assert_eq!(listing.price, 2500.0);
    match &listing.terms {
        ListingTerms::Swap {
            swap_preferences,
            swap_value,
        } => {
            assert_eq!(swap_preferences, "Villa in Jumeirah");
            assert_eq!(*swap_value, Some(3000.0));
        }
        other => panic!("expected swap terms, got {other:?}"),
    }
    match &listing.details {
        PropertyDetails::House(house) => {
            assert_eq!(house.bedrooms, 2);
            assert_eq!(house.area_sqm, Some(110.5));
            assert_eq!(house.amenities, vec!["Pool".to_string(), "Gym".to_string()]);
        }
        other => panic!("expected house details, got {other:?}"),
    }
}

#[test]
fn rejects_each_missing_required_field() {
    let cases: [(fn(&mut ListingDraft), ListingValidationError); 7] = [
        (
            |draft: &mut ListingDraft| draft.title = "   ".to_string(),
            ListingValidationError::MissingField("title"),
        ),
        (
            |draft: &mut ListingDraft| draft.description.clear(),
            ListingValidationError::MissingField("description"),
        ),
        (
            |draft: &mut ListingDraft| draft.price.clear(),
            ListingValidationError::MissingField("price"),
        ),
        (
            |draft: &mut ListingDraft| draft.category.clear(),
            ListingValidationError::MissingField("category"),
        ),
        (
            |draft: &mut ListingDraft| draft.property_type = None,
            ListingValidationError::MissingPropertyType,
        ),
        (
            |draft: &mut ListingDraft| draft.images.clear(),
            ListingValidationError::MissingImages,
        ),
        (
            |draft: &mut ListingDraft| draft.location = None,
            ListingValidationError::MissingLocation,
        ),
    ];

    for (mutate, expected) in cases {
        let mut draft = car_rent_draft();
        mutate(&mut draft);
        match guard().listing_from_draft(draft, &seller()) {
            Err(err) => assert_eq!(err, expected),
            Ok(listing) => panic!("expected {expected:?}, got listing {listing:?}"),
        }
    }
}

#[test]
fn rejects_non_numeric_and_negative_prices() {
    for price in ["abc", "-5", "NaN"] {
        let mut draft = car_rent_draft();
        draft.price = price.to_string();
        match guard().listing_from_draft(draft, &seller()) {
            Err(ListingValidationError::InvalidPrice(found)) => assert_eq!(found, price),
            other => panic!("expected invalid price for {price}, got {other:?}"),
        }
    }
}

#[test]
fn rejects_too_many_images() {
    let mut draft = car_rent_draft();
    for index in 0..MAX_IMAGES {
        draft.add_image(format!("file:///photos/extra-{index}.jpg"));
    }

    match guard().listing_from_draft(draft, &seller()) {
        Err(ListingValidationError::TooManyImages { max, found }) => {
            assert_eq!(max, MAX_IMAGES);
            assert_eq!(found, MAX_IMAGES + 1);
        }
        other => panic!("expected too many images, got {other:?}"),
    }
}

#[test]
fn rejects_zero_minimum_rental_period_and_unknown_period() {
    let mut draft = car_rent_draft();
    draft.rent.minimum_rental_period = "0".to_string();
    assert_eq!(
        guard().listing_from_draft(draft, &seller()).err(),
        Some(ListingValidationError::ZeroMinimumRentalPeriod)
    );

    let mut draft = car_rent_draft();
    draft.rent.rental_period = "hourly".to_string();
    assert_eq!(
        guard().listing_from_draft(draft, &seller()).err(),
        Some(ListingValidationError::InvalidRentalPeriod("hourly".to_string()))
    );
}

#[test]
fn parses_optional_car_and_rent_fields() {
    let mut draft = car_rent_draft();
    draft.car.year = "2021".to_string();
    draft.car.mileage = "32000".to_string();
    draft.car.transmission = "Auto".to_string();
    draft.rent.rental_period = "Monthly".to_string();
    draft.rent.minimum_rental_period = "2".to_string();
    draft.rent.security_deposit = "500".to_string();

    let listing = guard()
        .listing_from_draft(draft, &seller())
        .expect("draft is valid");

    assert_eq!(
        listing.terms,
        ListingTerms::Rent {
            rental_period: RentalPeriod::Monthly,
            minimum_rental_period: 2,
            security_deposit: Some(500.0),
        }
    );
    match listing.details {
        PropertyDetails::Car(car) => {
            assert_eq!(car.year, Some(2021));
            assert_eq!(car.mileage_km, Some(32000));
            assert_eq!(car.transmission, Some(Transmission::Automatic));
        }
        other => panic!("expected car details, got {other:?}"),
    }
}

#[test]
fn rejects_malformed_detail_numbers() {
    let mut draft = car_rent_draft();
    draft.car.year = "twenty".to_string();

    match guard().listing_from_draft(draft, &seller()) {
        Err(ListingValidationError::InvalidNumber { field, value }) => {
            assert_eq!(field, "year");
            assert_eq!(value, "twenty");
        }
        other => panic!("expected invalid number, got {other:?}"),
    }
}
