// File: soopwatch-tui/src/commands/mod.rs

use crate::TuiContext;

pub mod config;
pub mod streamer;

/// Execute one console line. Returns `(quit, output)`.
pub async fn dispatch(line: &str, ctx: &TuiContext) -> (bool, Option<String>) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let cmd = parts.first().unwrap_or(&"").to_lowercase();
    let args = parts.get(1..).unwrap_or_default();

    match cmd.as_str() {
        "" => (false, None),
        "help" => {
            let help = "\
Commands:
  help
  streamer add <id>        register a streamer for alerts
  streamer remove <id>     unregister a streamer (drops its status + log)
  streamer list            show registered streamers
  streamer search <id>     check whether an id is registered
  streamer log <id>        show the transition log for a streamer
  status                   show last-known live status for each streamer
  notifications [on|off]   toggle or set desktop notifications
  interval [minutes]       show or change the poll interval
  check                    run one poll cycle now
  quit
";
            (false, Some(help.to_string()))
        }
        "streamer" => (false, Some(streamer::handle_streamer_command(args, ctx).await)),
        "status" => (false, Some(streamer::handle_status_command(ctx).await)),
        "notifications" => (
            false,
            Some(config::handle_notifications_command(args, ctx).await),
        ),
        "interval" => (false, Some(config::handle_interval_command(args, ctx).await)),
        "check" => {
            let out = match ctx.monitor.check_all_broadcasts().await {
                Ok(()) => "Poll cycle complete.".to_string(),
                Err(e) => format!("Poll cycle failed: {e}"),
            };
            (false, Some(out))
        }
        "quit" | "exit" => (true, Some("Exiting...".to_string())),
        other => (
            false,
            Some(format!("Unknown command '{other}' (try 'help')")),
        ),
    }
}
