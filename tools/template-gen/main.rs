use clap::Parser;
use convoforge::template::{OptionSchema, ScreenId, ScreenSchema, TemplateId, TemplateSchema};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// A CLI tool to generate random conversation templates for stress testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_template.json")]
    output: String,

    /// Name of the generated template
    #[arg(long, default_value = "generated")]
    name: String,

    /// Number of screens to generate
    #[arg(long, default_value_t = 20)]
    screens: usize,

    /// The maximum number of options per screen
    #[arg(long, default_value_t = 4)]
    max_options: usize,

    /// Generate the template in localization mode
    #[arg(long)]
    localized: bool,
}

const QUESTS: [&str; 4] = ["find_relic", "escort_trader", "clear_mine", "deliver_letter"];
const PROBES: [&str; 2] = ["hasActiveQuest", "hasCompletedQuest"];
const MUTATIONS: [&str; 3] = ["activateTask", "completeQuest", "resetQuest"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.screens == 0 {
        eprintln!("Error: --screens must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating template '{}' with {} screens (up to {} options each)...",
        cli.name, cli.screens, cli.max_options
    );

    let screens = (0..cli.screens)
        .map(|i| generate_screen(&mut rng, &cli, i))
        .collect();

    let schema = TemplateSchema {
        id: Some(TemplateId(1)),
        name: cli.name.clone(),
        stf_mode: cli.localized,
        stf_path_prefix: "@conversation/".to_string(),
        initial_screen: None,
        screens,
    };

    fs::write(&cli.output, schema.to_json_pretty()?)?;
    println!(
        "Successfully generated and saved template to '{}'",
        cli.output
    );
    Ok(())
}

fn generate_screen(rng: &mut ThreadRng, cli: &Cli, index: usize) -> ScreenSchema {
    let option_count = rng.random_range(0..=cli.max_options);
    let options = (0..option_count)
        .map(|o| {
            // Occasionally point past the last screen to exercise dangling links.
            let next_screen = rng
                .random_bool(0.8)
                .then(|| ScreenId(rng.random_range(0..=cli.screens as u64)));
            OptionSchema {
                id: None,
                text: format!("Option {} of screen {}", o + 1, index),
                stf_reference: cli
                    .localized
                    .then(|| format!("@conversation/{}:o_{}_{}", cli.name, index, o)),
                next_screen,
            }
        })
        .collect();

    let (task_action, task_reaction) = if rng.random_bool(0.3) {
        let actions: &[&str] = if rng.random_bool(0.5) { &PROBES } else { &MUTATIONS };
        let action = actions[rng.random_range(0..actions.len())];
        let quest = QUESTS[rng.random_range(0..QUESTS.len())];
        (Some(action.to_string()), Some(quest.to_string()))
    } else {
        (None, None)
    };
    let journal = task_action.as_deref() == Some("activateTask");

    ScreenSchema {
        id: ScreenId(index as u64),
        id_name: format!("screen_{}", index),
        custom_dialog_text: format!("This is screen number {}.", index),
        left_dialog: cli
            .localized
            .then(|| format!("@conversation/{}:s_{}", cli.name, index)),
        stop_conversation: option_count == 0,
        task_action,
        task_reaction,
        task_title: journal.then(|| format!("Task from screen {}", index)),
        task_description: journal.then(|| format!("Complete the task given on screen {}.", index)),
        options,
    }
}
