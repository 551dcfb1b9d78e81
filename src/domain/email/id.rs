use chrono::Utc;
use rand::Rng;
use std::env;

pub const MESSAGE_ID_TAG: &str = "swift";

/// Generates a unique message id of the form
/// `<utc time>.<random int>.swift@<hostname>`.
pub fn generate_message_id() -> String {
    format!(
        "{}.{}.{}@{}",
        Utc::now().format("%Y%m%d%H%M%S"),
        rand::thread_rng().gen_range(0..=i32::MAX),
        MESSAGE_ID_TAG,
        message_id_hostname(),
    )
}

/// Gets the advertised name of the web server, falling back to the
/// network name of the machine.
pub fn message_id_hostname() -> String {
    env::var("SERVER_NAME")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .or_else(|| {
            hostname::get()
                .ok()
                .and_then(|name| name.into_string().ok())
                .filter(|name| !name.is_empty())
        })
        .unwrap_or_else(|| String::from("localhost"))
}
