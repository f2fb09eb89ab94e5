use tokio::time::Duration;

use crate::TuiContext;

const MS_PER_MINUTE: u64 = 60_000;

/// Accepts a positive whole number of minutes, rejects everything else.
pub fn parse_interval_minutes(input: &str) -> Option<u64> {
    match input.trim().parse::<u64>() {
        Ok(minutes) if minutes > 0 => Some(minutes),
        _ => None,
    }
}

pub async fn handle_interval_command(args: &[&str], ctx: &TuiContext) -> String {
    match args {
        [] => match ctx.config_repo.poll_interval_ms().await {
            Ok(ms) => format!(
                "Poll interval: {} ms ({:.1} minutes)",
                ms,
                ms as f64 / MS_PER_MINUTE as f64
            ),
            Err(e) => format!("Error reading interval: {e}"),
        },
        [value] => {
            let Some(minutes) = parse_interval_minutes(value) else {
                return "Please enter a positive whole number of minutes; keeping the current interval.".to_string();
            };
            let interval_ms = minutes * MS_PER_MINUTE;

            if let Err(e) = ctx.config_repo.set_poll_interval_ms(interval_ms).await {
                return format!("Error saving interval: {e}");
            }
            if let Err(e) = ctx
                .scheduler
                .reschedule(Duration::from_millis(interval_ms))
                .await
            {
                return format!("Error rescheduling poller: {e}");
            }
            format!("Poll interval set to {minutes} minute(s).")
        }
        _ => "Usage: interval [minutes]".to_string(),
    }
}

pub async fn handle_notifications_command(args: &[&str], ctx: &TuiContext) -> String {
    let new_state = match args {
        [] => match ctx.config_repo.notifications_enabled().await {
            Ok(current) => !current,
            Err(e) => return format!("Error reading notification setting: {e}"),
        },
        ["on"] => true,
        ["off"] => false,
        _ => return "Usage: notifications [on|off]".to_string(),
    };

    if let Err(e) = ctx.config_repo.set_notifications_enabled(new_state).await {
        return format!("Error saving notification setting: {e}");
    }
    if new_state {
        "Notifications are now enabled.".to_string()
    } else {
        "Notifications are now disabled.".to_string()
    }
}
