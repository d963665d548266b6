use crate::commands::{
    run_categories, run_contact, run_current_location, run_distance, run_faqs,
    run_listing_create, DistanceArgs, FaqArgs, ListingCreateArgs,
};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rentswap::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "RentSwap",
    about = "Run the RentSwap marketplace service or exercise it from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate and publish listings
    Listing {
        #[command(subcommand)]
        command: ListingCommand,
    },
    /// Device location and distance utilities
    Location {
        #[command(subcommand)]
        command: LocationCommand,
    },
    /// Browse the help center and reach support
    Help {
        #[command(subcommand)]
        command: HelpCommand,
    },
    /// Run an end-to-end demo: listings, address book, location, and help center
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ListingCommand {
    /// Validate a listing and print the stored record
    Create(ListingCreateArgs),
    /// Print the categories offered for a property type
    Categories {
        /// HOUSE or CAR
        property_type: String,
    },
}

#[derive(Subcommand, Debug)]
enum LocationCommand {
    /// Print the device location, reverse geocoded when a geocoder is configured
    Current,
    /// Great-circle distance in kilometres
    Distance(DistanceArgs),
}

#[derive(Subcommand, Debug)]
enum HelpCommand {
    /// List or search frequently asked questions
    Faqs(FaqArgs),
    /// Open a support channel (whatsapp, email, phone, website)
    Contact {
        channel: String,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Listing {
            command: ListingCommand::Create(args),
        } => run_listing_create(args).await,
        Command::Listing {
            command: ListingCommand::Categories { property_type },
        } => run_categories(&property_type),
        Command::Location {
            command: LocationCommand::Current,
        } => run_current_location().await,
        Command::Location {
            command: LocationCommand::Distance(args),
        } => run_distance(args).await,
        Command::Help {
            command: HelpCommand::Faqs(args),
        } => run_faqs(args),
        Command::Help {
            command: HelpCommand::Contact { channel },
        } => run_contact(&channel),
        Command::Demo(args) => run_demo(args).await,
    }
}
