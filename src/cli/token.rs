use anyhow::Result;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Print a bearer token for `subject` to stdout.
#[tracing::instrument(skip(config))]
pub fn token(config: crate::config::Config, subject: String, days: Option<u64>) -> Result<()> {
    let days = match days {
        Some(days) => days,
        None => u64::try_from(config.jwt.expiration_days)?,
    };

    let token = crate::auth::generate_token(
        subject,
        &config.jwt.secret,
        days.saturating_mul(SECONDS_PER_DAY),
    )?;
    tracing::info!(days, "token issued");

    println!("{token}");

    Ok(())
}
