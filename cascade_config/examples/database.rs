//! Loads a service configuration from the process environment and
//! `/run/secrets`, optionally layering a parameter-store snapshot.
//!
//! ```text
//! ORDERS_DATABASE_HOST=pg.internal ORDERS_DATABASE_PORT=5432 \
//!     ORDERS_REPLICAS_0_HOST=pg-r1.internal \
//!     cargo run -p cascade_config --example database
//! ```

use cascade_config::{Basic, CascadeConfig, CascadeResult, RemoteParams};
use serde::Deserialize;

#[derive(Debug, Default, PartialEq, Deserialize, CascadeConfig)]
struct Database {
    #[cascade_config(default = "localhost")]
    host: String,
    #[cascade_config(required)]
    port: u16,
    #[cascade_config(secret = "orders_db_password")]
    password: String,
    #[cascade_config(default = 10)]
    max_connections: u32,
}

#[derive(Debug, Default, PartialEq, Deserialize, CascadeConfig)]
struct Replica {
    host: String,
    #[cascade_config(default = false)]
    read_only: bool,
}

#[derive(Debug, Default, PartialEq, Deserialize, CascadeConfig)]
#[cascade_config(prefix = "ORDERS")]
struct Orders {
    #[cascade_config(flatten)]
    basic: Basic,
    database: Database,
    replicas: Vec<Replica>,
    #[cascade_config(env = "ORDERS_FEATURES")]
    features: Vec<String>,
}

#[expect(clippy::print_stdout, reason = "example prints the loaded configuration")]
fn main() -> CascadeResult<()> {
    let mut remote = RemoteParams::default();
    remote.insert("ORDERS_DATABASE_MAX_CONNECTIONS", "25");

    let mut orders = Orders::default();
    cascade_config::load_with_remote(&mut orders, cascade_config::DEFAULT_SECRET_DIR, &remote)?;

    println!("environment: {}", orders.basic.env);
    println!(
        "database: {}:{} (pool {})",
        orders.database.host, orders.database.port, orders.database.max_connections
    );
    for (index, replica) in orders.replicas.iter().enumerate() {
        println!("replica {index}: {} (read-only: {})", replica.host, replica.read_only);
    }
    println!("password set: {}", !orders.database.password.is_empty());
    println!("features: {:?}", orders.features);
    Ok(())
}
