use soopwatch_common::Error;
use crate::TuiContext;

pub async fn handle_streamer_command(args: &[&str], ctx: &TuiContext) -> String {
    match args {
        ["add", id] => match ctx.streamer_service.add_streamer(id).await {
            Ok(()) => format!("Streamer '{id}' registered."),
            Err(Error::AlreadyTracked(_)) => {
                format!("Streamer '{id}' is already registered.")
            }
            Err(e) => format!("Error adding streamer: {e}"),
        },
        ["remove", id] => match ctx.streamer_service.remove_streamer(id).await {
            Ok(()) => format!("Streamer '{id}' unregistered."),
            Err(Error::NotFound(_)) => format!("Streamer '{id}' is not registered."),
            Err(e) => format!("Error removing streamer: {e}"),
        },
        ["list"] => match ctx.streamer_service.list_streamers().await {
            Ok(streamers) if streamers.is_empty() => "No streamers registered.".to_string(),
            Ok(streamers) => {
                let mut out = String::from("Registered streamers:\n");
                for s in streamers {
                    out.push_str(&format!("  {}\n", s.streamer_id));
                }
                out
            }
            Err(e) => format!("Error listing streamers: {e}"),
        },
        ["search", id] => match ctx.streamer_service.is_tracked(id).await {
            Ok(true) => format!("'{id}' is registered."),
            Ok(false) => format!("'{id}' is not registered."),
            Err(e) => format!("Error searching: {e}"),
        },
        ["log", id] => match ctx.streamer_service.status_log(id).await {
            Ok(entries) if entries.is_empty() => format!("No log entries for '{id}'."),
            Ok(entries) => {
                let mut out = format!("Status log for '{id}':\n");
                for entry in entries {
                    out.push_str(&format!(
                        "  {}  {}\n",
                        entry.logged_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        entry.status
                    ));
                }
                out
            }
            Err(e) => format!("Error reading log: {e}"),
        },
        _ => "Usage: streamer <add|remove|search|log> <id>  |  streamer list".to_string(),
    }
}

pub async fn handle_status_command(ctx: &TuiContext) -> String {
    let streamers = match ctx.streamer_service.list_streamers().await {
        Ok(s) => s,
        Err(e) => return format!("Error listing streamers: {e}"),
    };
    if streamers.is_empty() {
        return "No streamers registered.".to_string();
    }

    let statuses = match ctx.status_repo.all_statuses().await {
        Ok(s) => s,
        Err(e) => return format!("Error reading statuses: {e}"),
    };
    let live: std::collections::HashMap<String, bool> = statuses.into_iter().collect();

    let mut out = String::from("Last-known status:\n");
    for s in streamers {
        // Never-observed streamers read as offline.
        let is_live = live.get(&s.streamer_id).copied().unwrap_or(false);
        let label = if is_live { "LIVE" } else { "offline" };
        out.push_str(&format!("  {:<20} {}\n", s.streamer_id, label));
    }
    out
}
