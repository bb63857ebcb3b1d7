mod domain;
mod clients;
mod config;
mod dashboard;
mod reports;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod user_actor;
mod car_actor;
mod order_actor;

use tracing::{error, info, warn, Instrument};
use crate::app_system::{setup_tracing, ShowroomSystem};
use crate::clients::{CartLine, Checkout};
use crate::config::ShowroomConfig;
use crate::domain::{OrderStatus, Role, UserCreate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ShowroomConfig::from_env()?;
    setup_tracing(&config.log_filter);

    info!("Starting showroom with seeded stores");

    let system = ShowroomSystem::new(config.channel_buffer);

    let span = tracing::info_span!("user_creation");
    let user_id = async {
        info!("Registering customer");
        system
            .user_client
            .create_user(UserCreate {
                name: "Jordan Park".to_string(),
                email: "jordan@example.com".to_string(),
                role: Role::Customer,
            })
            .await
    }
    .instrument(span)
    .await?;

    info!(user_id = %user_id, "User created successfully");

    let span = tracing::info_span!("checkout");
    let order_result = async {
        info!("Checking out cart");
        system
            .order_client
            .place_order(Checkout {
                user_id: user_id.clone(),
                items: vec![CartLine { car_id: "car_3".to_string(), quantity: 1 }],
                phone: None,
                address: Some("42 Harbor Rd".to_string()),
            })
            .await
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order_id) => {
            info!(order_id = %order_id, "Order placed successfully");
            if let Err(e) = system
                .order_client
                .record_stage(order_id, OrderStatus::Processing, Some("Financing approved".to_string()))
                .await
            {
                warn!(error = %e, "Could not advance order");
            }
        }
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    let dashboard = system.dashboard(&config).await?;
    println!("{}", dashboard);

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
