use recipe_client::{App, Config};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Using recipe server at {}", config.server_url);
    tracing::info!("Session token file: {}", config.token_path.display());

    let app = App::from_config(config);

    // Mirror the banner into the log so failures are visible on the console
    let mut banner = app.reporter().subscribe();
    tokio::spawn(async move {
        while banner.changed().await.is_ok() {
            match banner.borrow_and_update().clone() {
                Some(message) => tracing::warn!("Banner: {}", message),
                None => tracing::debug!("Banner cleared"),
            }
        }
    });

    if !app.tokens().is_logged_in() {
        let (Ok(username), Ok(password)) = (env::var("RECIPE_USERNAME"), env::var("RECIPE_PASSWORD"))
        else {
            anyhow::bail!("No stored session. Set RECIPE_USERNAME and RECIPE_PASSWORD to log in.");
        };

        if !app.login(&username, &password).await? {
            tracing::error!("Login failed: {}", app.reporter().current().unwrap_or_default());
            tracing::error!("Please verify:");
            tracing::error!("  - RECIPE_SERVER_URL is correct: {}", app.config().server_url);
            tracing::error!("  - RECIPE_USERNAME is correct: {}", username);
            tracing::error!("  - RECIPE_PASSWORD is correct");
            std::process::exit(1);
        }
    }

    match app.current_user().await? {
        Some(user) => tracing::info!(
            "Logged in as {} ({}){}",
            user.display_name,
            user.username,
            if user.admin { ", admin" } else { "" }
        ),
        None => {
            tracing::warn!("Stored session was rejected; logging out");
            app.logout();
        }
    }

    match app.client().get_all_recipes().await? {
        Some(recipes) => {
            tracing::info!("{} recipes on the server", recipes.len());
            for recipe in &recipes {
                tracing::info!(
                    "  {} (serves {}, {} min prep, {} min cook)",
                    recipe.title,
                    recipe.servings,
                    recipe.prep_time,
                    recipe.cook_time
                );
            }
        }
        None => tracing::info!("No recipes available"),
    }

    Ok(())
}
