use clap::Parser;
use kitchen_shelves::actors::{UniformSchedule, VecSource};
use kitchen_shelves::config::KitchenConfig;
use kitchen_shelves::framework::ShelfContext;
use kitchen_shelves::kitchen::KitchenEvent;
use kitchen_shelves::lifecycle::{setup_tracing, KitchenSystem};
use kitchen_shelves::source::load_orders;
use tokio::sync::mpsc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "kitchen-shelves")]
#[command(about = "Simulates a kitchen's order shelves under capacity pressure and decay", long_about = None)]
struct Args {
    /// Path of the orders file (JSON array)
    #[arg(short, long, default_value = "orders.json")]
    orders_file: String,

    /// Orders posted to the kitchen per second
    #[arg(short, long)]
    arrival_rate: Option<f64>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Shortest wait before a courier arrives, in seconds
    #[arg(long)]
    courier_min: Option<u64>,

    /// Longest wait before a courier arrives, in seconds
    #[arg(long)]
    courier_max: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<(KitchenConfig, String), Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => KitchenConfig::from_path(path)?,
            None => KitchenConfig::default(),
        };
        // Command line args override config file
        if let Some(rate) = self.arrival_rate {
            config.arrival_rate = rate;
        }
        if let Some(lower) = self.courier_min {
            config.pickup_interval.lower_secs = lower;
        }
        if let Some(upper) = self.courier_max {
            config.pickup_interval.upper_secs = upper;
        }
        config.validate()?;
        Ok((config, self.orders_file))
    }
}

fn describe(event: &KitchenEvent) -> String {
    match event {
        KitchenEvent::Arrived { order } => format!("New order arrived: {order}"),
        KitchenEvent::Placed { order, shelf } => format!("Placed on {shelf} shelf: {order}"),
        KitchenEvent::Promoted { order, to } => {
            format!("Moved from overflow to {to} shelf: {order}")
        }
        KitchenEvent::Discarded { order } => {
            format!("Discarded for lack of shelf space: {order}")
        }
        KitchenEvent::PickedUp { order } => format!("Courier took out: {order}"),
        KitchenEvent::NothingToPickUp => "No order waiting for this courier".to_string(),
        KitchenEvent::Expired { order } => format!("Discarded as expired: {order}"),
        KitchenEvent::ShelfStatus { shelves } => {
            let levels: Vec<String> = shelves
                .iter()
                .map(|level| format!("{} {}/{}", level.shelf, level.held, level.capacity))
                .collect();
            format!("Shelves after expiry sweep: {}", levels.join(", "))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let (config, orders_file) = Args::parse().into_config()?;
    info!(?config, "Starting kitchen");

    // Fail fast: every record is validated before the shelves exist.
    let orders = load_orders(&orders_file)?;

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let reporter = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            println!("{}", describe(&event));
        }
    });

    let system = KitchenSystem::new(
        &config,
        UniformSchedule::new(config.pickup_interval),
        ShelfContext::with_events(events_tx),
    );
    let result = system.run(VecSource::new(orders)).await;
    reporter.await?;

    match result {
        Ok(summary) => {
            print!("{summary}");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Simulation failed");
            Err(e.into())
        }
    }
}
