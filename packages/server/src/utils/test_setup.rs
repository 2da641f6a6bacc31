use dotenvy::dotenv;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn setup_test_env() {
    INIT.call_once(|| {
        dotenv().ok();
        // fallbacks when there is no .env
        if std::env::var("GABI_DEBUG_SHOW_ROLES").is_err() {
            std::env::set_var("GABI_DEBUG_SHOW_ROLES", "true");
        }
        if std::env::var("GABI_SEED").is_err() {
            std::env::set_var("GABI_SEED", "42");
        }
    });
}
