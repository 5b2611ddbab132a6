//! Console command parsing

use dial_gear::{ComponentKind, Slot};

/// One line of console input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tune(f64),
    /// Positive moves up the dial
    Step(i32),
    Equip { item: String, slot: Slot },
    Unequip(Slot),
    Upgrade(ComponentKind),
    /// Build the custom radio from its parts
    Assemble,
    Power(bool),
    Give(String),
    Take(String),
    Status,
    Effects,
    Save,
    Help,
    Quit,
}

/// Parse a console line
///
/// Returns `Ok(None)` for blank lines.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("tune", [mhz]) => Command::Tune(
            mhz.parse()
                .map_err(|_| format!("not a frequency: {}", mhz))?,
        ),
        ("up", []) => Command::Step(1),
        ("down", []) => Command::Step(-1),
        ("up", [n]) => Command::Step(parse_steps(n)?),
        ("down", [n]) => Command::Step(-parse_steps(n)?),
        ("equip", [item, slot]) => Command::Equip {
            item: item.to_string(),
            slot: slot.parse().map_err(|e| format!("{}", e))?,
        },
        ("unequip", [slot]) => Command::Unequip(slot.parse().map_err(|e| format!("{}", e))?),
        ("upgrade", [component]) => {
            Command::Upgrade(component.parse().map_err(|e| format!("{}", e))?)
        }
        ("assemble", []) => Command::Assemble,
        ("power", ["on"]) => Command::Power(true),
        ("power", ["off"]) => Command::Power(false),
        ("give", [item]) => Command::Give(item.to_string()),
        ("take", [item]) => Command::Take(item.to_string()),
        ("status", []) => Command::Status,
        ("effects", []) => Command::Effects,
        ("save", []) => Command::Save,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (verb, _) => return Err(format!("unknown command or arguments: {} (try help)", verb)),
    };
    Ok(Some(command))
}

fn parse_steps(s: &str) -> Result<i32, String> {
    match s.parse::<i32>() {
        Ok(n) if (0..=10_000).contains(&n) => Ok(n),
        _ => Err(format!("not a step count: {}", s)),
    }
}

/// Usage text
pub const HELP: &str = "\
commands:
  tune <mhz>              move the dial
  up [n] | down [n]       move by tuning steps
  equip <item> <slot>     slots: radio head hands acc1 acc2
  unequip <slot>
  upgrade <component>     antenna tuner amplifier battery decoder
  assemble                build radio_custom from radio_broken + radio_part
  power on|off
  give <item> | take <item>
  status | effects | save | quit";
