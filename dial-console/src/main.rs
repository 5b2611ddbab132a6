//! dialscan - console front end for the dial receiver
//!
//! Reads commands from stdin, forwards them to a receiver task and prints
//! receiver events as they arrive.

mod commands;
mod settings;

use anyhow::Context;
use dial_signal::{FrequencyBand, Reception};
use dial_sim::{
    run_receiver_task, Receiver, ReceiverConfig, ReceiverEvent, ReceiverHandle, ReceiverStatus,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Command, HELP};
use settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dialscan=info,dial_signal=info,dial_gear=info,dial_sim=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting dialscan");

    let mut settings = Settings::load();
    let receiver = build_receiver(&settings)?;

    let (cmd_tx, cmd_rx) = mpsc::channel(32);
    let (event_tx, event_rx) = broadcast::channel(256);
    let task = tokio::spawn(run_receiver_task(receiver, cmd_rx, event_tx));
    tokio::spawn(print_events(event_rx));

    let handle = ReceiverHandle::new(cmd_tx);
    println!("{}", HELP);
    print_reception(&handle.status().await?.reception);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        if let Err(e) = execute(&handle, &mut settings, command).await {
            println!("error: {}", e);
        }
    }

    store(&handle, &mut settings).await?;
    handle.shutdown().await?;
    task.await.context("receiver task panicked")?;
    info!("dialscan stopped");
    Ok(())
}

/// Build the receiver from settings, restoring inventory and saved state
fn build_receiver(settings: &Settings) -> anyhow::Result<Receiver> {
    let config = match &settings.config_path {
        Some(path) => ReceiverConfig::load(path)
            .with_context(|| format!("loading receiver config {}", path.display()))?,
        None => ReceiverConfig::default(),
    };
    let mut receiver = config.build().context("building receiver")?;

    for item in &settings.owned_items {
        receiver.add_item(item.clone());
    }
    if let Err(e) = receiver.restore_state(&settings.state) {
        warn!("Ignoring saved equipment: {}", e);
    }
    if let Some(frequency) = settings.frequency {
        receiver.tune(frequency);
    }
    // Startup events are not interesting to the user
    receiver.drain_events();

    Ok(receiver)
}

async fn execute(
    handle: &ReceiverHandle,
    settings: &mut Settings,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Tune(mhz) => print_reception(&handle.tune(mhz).await?),
        Command::Step(steps) => print_reception(&handle.nudge(steps).await?),
        Command::Equip { item, slot } => {
            let outcome = handle.equip(item, slot).await?;
            if !outcome.changed {
                println!("{} is already in {}", outcome.item, outcome.slot);
            }
        }
        Command::Unequip(slot) => {
            handle.unequip(slot).await?;
        }
        Command::Upgrade(component) => {
            handle.upgrade(component).await?;
        }
        Command::Assemble => handle.assemble_custom_radio().await?,
        Command::Power(on) => handle.set_powered(on).await?,
        Command::Give(item) => {
            if !handle.add_item(item.clone()).await? {
                println!("already holding {}", item);
            }
        }
        Command::Take(item) => {
            if !handle.remove_item(item.clone()).await? {
                println!("not holding {}", item);
            }
        }
        Command::Status => print_status(&handle.status().await?),
        Command::Effects => println!("{}", handle.status().await?.params.summary()),
        Command::Save => {
            store(handle, settings).await?;
            println!("saved");
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

/// Copy receiver state into settings and write them out
async fn store(handle: &ReceiverHandle, settings: &mut Settings) -> anyhow::Result<()> {
    let status = handle.status().await?;
    settings.state = handle.save_state().await?;
    settings.owned_items = status.inventory.into_iter().collect();
    settings.frequency = Some(status.frequency);
    settings.save()
}

async fn print_events(mut event_rx: broadcast::Receiver<ReceiverEvent>) {
    loop {
        match event_rx.recv().await {
            Ok(event) => print_event(&event),
            Err(broadcast::error::RecvError::Lagged(n)) => warn!("Missed {} receiver events", n),
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn print_event(event: &ReceiverEvent) {
    match event {
        ReceiverEvent::ItemEquipped { slot, item } => println!("  equipped {} in {}", item, slot),
        ReceiverEvent::ItemUnequipped { slot, item } => {
            println!("  removed {} from {}", item, slot)
        }
        ReceiverEvent::RadioChanged { radio, radio_type } => match (radio, radio_type) {
            (Some(id), Some(kind)) => println!("  radio: {} ({})", id, kind),
            (Some(id), None) => println!("  radio: {}", id),
            (None, _) => println!("  radio: none"),
        },
        ReceiverEvent::CustomRadioAssembled { item } => println!("  assembled {}", item),
        ReceiverEvent::ComponentUpgraded { component, level } => {
            println!("  {} upgraded to level {}", component, level)
        }
        ReceiverEvent::EffectsUpdated(params) => println!("  effects: {}", params.summary()),
        ReceiverEvent::PowerChanged(on) => println!("  power {}", if *on { "on" } else { "off" }),
        ReceiverEvent::SignalAcquired { id, frequency, .. } => println!(
            "  signal {} acquired at {}",
            id,
            FrequencyBand::frequency_display(*frequency)
        ),
        ReceiverEvent::SignalLost { id } => println!("  signal {} lost", id),
        ReceiverEvent::SignalDiscovered { id } => println!("  new signal discovered: {}", id),
    }
}

fn print_reception(reception: &Reception) {
    let bar = meter(reception.strength);
    match &reception.matched_id {
        Some(id) => println!(
            "{}  {} {}  static {:.2}",
            FrequencyBand::frequency_display(reception.frequency),
            bar,
            id,
            reception.static_intensity
        ),
        None => println!(
            "{}  {}  static {:.2}",
            FrequencyBand::frequency_display(reception.frequency),
            bar,
            reception.static_intensity
        ),
    }
}

fn print_status(status: &ReceiverStatus) {
    println!(
        "{} (step {:.3} MHz), power {}",
        FrequencyBand::frequency_display(status.frequency),
        status.tuning_step,
        if status.powered { "on" } else { "off" }
    );
    print_reception(&status.reception);
    if status.reception.is_matched() {
        let unlocked = status.reception.payload_unlocked(&status.params);
        println!("payload: {}", if unlocked { "readable" } else { "locked" });
    }
    for (slot, item) in status.equipped.iter() {
        println!("  {:<10} {}", slot.to_string(), item);
    }
    let levels: Vec<String> = status
        .levels
        .iter()
        .map(|(component, level)| format!("{} {}", component, level))
        .collect();
    println!("components: {}", levels.join(", "));
    println!(
        "inventory: {}",
        status.inventory.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    if status.can_assemble {
        println!("parts ready: assemble to build a custom radio");
    }
    println!("discovered: {}/{}", status.discovered.len(), status.signal_count);
}

/// Ten-segment strength meter
fn meter(strength: f64) -> String {
    let filled = (strength.clamp(0.0, 1.0) * 10.0).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}
