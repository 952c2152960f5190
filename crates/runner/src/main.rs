use log::info;
use vela_runner::{SimulationConfig, TradingSimulation};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = SimulationConfig::default();
    info!("starting vela trading pipeline simulation");

    let simulation = TradingSimulation::new(config);
    let results = simulation.run().await;

    match serde_json::to_string_pretty(&results) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize results: {e}"),
    }
}
