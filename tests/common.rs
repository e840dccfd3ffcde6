//! Common test utilities for building conversation templates.
use convoforge::prelude::*;

/// A small shop conversation in literal mode.
///
/// `greet` -> `wares` | `bye`; `wares` -> `greet`; `bye` ends the conversation.
#[allow(dead_code)]
pub fn create_vendor_template() -> Template {
    Template::builder("vendor")
        .id(TemplateId(1))
        .screen(
            Screen::new(ScreenId(10), "greet", "Need anything?")
                .with_option(DialogOption::new("Show me your wares.").leads_to(ScreenId(11)))
                .with_option(DialogOption::new("Goodbye.").leads_to(ScreenId(12))),
        )
        .screen(
            Screen::new(ScreenId(11), "wares", "Take a look.")
                .with_option(DialogOption::new("Back.").leads_to(ScreenId(10))),
        )
        .screen(Screen::new(ScreenId(12), "bye", "Come again.").terminal(true))
        .build()
        .expect("vendor template is valid")
}

/// The vendor conversation in localization mode, with every text keyed.
#[allow(dead_code)]
pub fn create_localized_template() -> Template {
    let key = |id: &str| format!("@conversation/vendor:{}", id);
    Template::builder("vendor")
        .id(TemplateId(2))
        .localized(true)
        .screen(
            Screen::new(ScreenId(10), "greet", "Need anything?")
                .with_key(key("s_1"))
                .with_option(
                    DialogOption::new("Show me your wares.")
                        .with_key(key("s_2"))
                        .leads_to(ScreenId(11)),
                )
                .with_option(DialogOption::new("Goodbye.").with_key(key("s_3"))),
        )
        .screen(
            Screen::new(ScreenId(11), "wares", "Take a look.")
                .with_key(key("s_4"))
                .terminal(true),
        )
        .build()
        .expect("localized template is valid")
}

/// A quest giver with two probe screens, two side-effect screens and a plain one.
#[allow(dead_code)]
pub fn create_quest_template() -> Template {
    Template::builder("quest_giver")
        .id(TemplateId(3))
        .initial_screen(ScreenId(1))
        .screen(
            Screen::new(ScreenId(1), "intro", "Hello, traveller.")
                .with_option(DialogOption::new("Any work?").leads_to(ScreenId(4))),
        )
        .screen(
            Screen::new(ScreenId(2), "done", "Thanks again!")
                .terminal(true)
                .with_trigger(QuestTrigger::new("hasCompletedQuest", "find_relic")),
        )
        .screen(
            Screen::new(ScreenId(3), "waiting", "Any luck?")
                .terminal(true)
                .with_trigger(QuestTrigger::new("hasActiveQuest", "find_relic")),
        )
        .screen(
            Screen::new(ScreenId(4), "offer", "Find my relic.")
                .terminal(true)
                .with_trigger(
                    QuestTrigger::new("activateTask", "find_relic")
                        .with_journal("Find the relic", "Search the old mine."),
                ),
        )
        .screen(
            Screen::new(ScreenId(5), "reward", "Here is your reward.")
                .terminal(true)
                .with_trigger(QuestTrigger::new("completeQuest", "find_relic")),
        )
        .build()
        .expect("quest template is valid")
}

/// The vendor conversation in the editor's JSON format.
#[allow(dead_code)]
pub const VENDOR_JSON: &str = r#"{
    "id": 7,
    "name": "vendor",
    "stf_mode": true,
    "initial_screen": null,
    "screens": [
        {
            "id": 10,
            "id_name": "greet",
            "custom_dialog_text": "Need anything?",
            "leftDialog": "@conversation/vendor:s_1",
            "stop_conversation": false,
            "task_action": "activateTask",
            "task_reaction": "browse_wares",
            "task_title": "Browse",
            "task_description": "Look at the vendor's wares.",
            "options": [
                { "id": 1, "text": "Show me.", "stfReference": "@conversation/vendor:s_2", "next_screen": 11 },
                { "id": 2, "text": "Bye.", "stfReference": "@conversation/vendor:s_3", "next_screen": null }
            ]
        },
        {
            "id": 11,
            "id_name": "wares",
            "custom_dialog_text": "Take a look.",
            "leftDialog": "@conversation/vendor:s_4",
            "stop_conversation": true,
            "options": []
        }
    ]
}"#;
