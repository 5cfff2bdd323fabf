use std::{sync::atomic::Ordering, time::Duration};

use drivelock::auth::authenticate;
use drivelock::clipboard::read_clipboard;
use drivelock::config::{Config, CONFIG_PATH};
use drivelock::drive::{client::DriveClient, url::resolve_item_id};
use drivelock::lock::{lock_items, walker::collect_items, LockContext};
use drivelock::{openssl_version, program_version};

use indicatif::ProgressBar;

fn exit_with(msg: String) -> !
{
    drivelock::log(msg, Some("ERROR"));
    std::process::exit(1);
}

#[tokio::main]
async fn main() {

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|x| x == "-v")
    {
        println!("Version: {}\n{}", program_version(), openssl_version());
        std::process::exit(0);
    }

    if args.iter().any(|x| x == "-d")
    {
        drivelock::OPTIONS.debug.store(true, Ordering::Relaxed);
    }

    if args.iter().any(|x| x == "-t")
    {
        drivelock::OPTIONS.debug_timestamp.store(true, Ordering::Relaxed);
    }

    let config = Config::load_or_default(CONFIG_PATH);

    let token = match authenticate(&config).await
    {
        Ok(t) => t,
        Err(e) => exit_with(format!("Authentication failed, {}", e))
    };

    let context = LockContext::new(DriveClient::new(&config.api_url(), &token.token), &config);
    drivelock::log(format!("Connected to the Drive API at {}", context.drive.api_url()), None);

    let url = match read_clipboard()
    {
        Ok(u) => u,
        Err(e) => exit_with(format!("Could not get a url from the clipboard, {}", e))
    };
    drivelock::log(format!("Read url from the clipboard: {}", url.trim()), None);

    let root_id = match resolve_item_id(&url)
    {
        Some(id) => id,
        None => exit_with("No Google Drive id found in the clipboard, e.g. https://drive.google.com/drive/folders/xxxxxxxxxxxxxxxxxxx".to_string())
    };
    drivelock::log(format!("Resolved id: {}", root_id), None);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Listing files (including sub folders)");
    spinner.enable_steady_tick(Duration::from_millis(100));
    drivelock::set_progress(Some(spinner.clone()));

    let items = collect_items(&context.drive, &root_id).await;
    drivelock::set_progress(None);
    spinner.finish_and_clear();

    let items = match items
    {
        Ok(i) => i,
        Err(e) => exit_with(format!("Could not fetch {}, {}", root_id, e))
    };

    drivelock::log(format!("Found {} files", items.len()), None);

    if items.is_empty()
    {
        drivelock::log("No files to lock".to_string(), None);
    }

    let report = lock_items(&context, &items).await;

    println!("\n{report}");
}
