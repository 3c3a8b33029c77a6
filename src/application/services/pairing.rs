//! First-run device linking via pairing code

use std::io::Write;

use crate::application::errors::BotError;
use crate::domain::traits::{LineSource, Session};
use crate::infrastructure::config::PairingConfig;

/// `ABCDEFGH` -> `ABCD-EFGH`
pub fn format_pairing_code(code: &str) -> String {
    let chars: Vec<char> = code.chars().collect();
    chars
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

/// Keep digits only, the format pairing requests expect
pub fn normalize_phone(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Ask for a phone number (unless configured), request a pairing code and print it.
/// Returns the formatted code.
pub async fn bootstrap<S, L>(
    session: &S,
    config: &PairingConfig,
    input: &mut L,
) -> Result<String, BotError>
where
    S: Session,
    L: LineSource,
{
    let raw = match &config.phone_number {
        Some(number) => number.clone(),
        None => {
            println!("Input nomor pake 62857xxx: ");
            print!("> ");
            let _ = std::io::stdout().flush();
            input.next_line().await?.unwrap_or_default()
        }
    };

    let phone = normalize_phone(&raw);
    if phone.is_empty() {
        return Err(BotError::Auth("no phone number given for pairing".to_string()));
    }

    tracing::info!("Requesting pairing code for {}", phone);
    let code = session
        .request_pairing_code(&phone, config.custom_code.as_deref())
        .await?;
    let formatted = format_pairing_code(&code);
    println!("Pairing Code: {}", formatted);
    Ok(formatted)
}
