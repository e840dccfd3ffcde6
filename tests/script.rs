//! Tests for Lua definition and handler generation.
mod common;
use common::*;
use convoforge::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_definition_script_for_literal_template() {
    let template = create_vendor_template();
    let script = generate_definition_script(&template).expect("Failed to generate");

    let expected = r#"vendor_convo_template = ConvoTemplate:new {
    initialScreen = "greet",
    templateType = "Lua",
    luaClassHandler = "vendor_convo_handler",
    screens = {}
}

greet = ConvoScreen:new {
    id = "greet",
    customDialogText = "Need anything?",
    stopConversation = "false",
    options = {
        {"Show me your wares.", "wares"},
        {"Goodbye.", "bye"}
    }
}
vendor_convo_template:addScreen(greet);

wares = ConvoScreen:new {
    id = "wares",
    customDialogText = "Take a look.",
    stopConversation = "false",
    options = {
        {"Back.", "greet"}
    }
}
vendor_convo_template:addScreen(wares);

bye = ConvoScreen:new {
    id = "bye",
    customDialogText = "Come again.",
    stopConversation = "true",
    options = {
    }
}
vendor_convo_template:addScreen(bye);

addConversationTemplate("vendor_convo_template", vendor_convo_template);
"#;
    assert_eq!(script, expected);
}

#[test]
fn test_definition_script_for_localized_template() {
    let template = create_localized_template();
    let script = generate_definition_script(&template).expect("Failed to generate");

    assert!(script.contains(
        "    leftDialog = \"@conversation/vendor:s_1\", -- Need anything?\n"
    ));
    assert!(script.contains(
        "        {\"@conversation/vendor:s_2\", \"wares\"}, -- Show me your wares.\n"
    ));
    assert!(script.contains("        {\"@conversation/vendor:s_3\", \"\"} -- Goodbye.\n"));
    assert!(!script.contains("customDialogText"));
}

#[test]
fn test_localized_screen_without_key_keeps_literal_text() {
    let template = Template::builder("partial")
        .localized(true)
        .screen(Screen::new(ScreenId(1), "start", "Plain text"))
        .build()
        .unwrap();
    let script = generate_definition_script(&template).unwrap();
    assert!(script.contains("    customDialogText = \"Plain text\",\n"));
}

#[test]
fn test_initial_screen_defaults_to_first_screen() {
    let template = Template::builder("order")
        .screen(Screen::new(ScreenId(5), "s1", "one"))
        .screen(Screen::new(ScreenId(3), "s2", "two"))
        .build()
        .unwrap();
    let script = generate_definition_script(&template).unwrap();
    assert!(script.contains("    initialScreen = \"s1\",\n"));

    let handler = generate_handler_script(&template).unwrap();
    assert!(handler.contains("    return convoTemplate:getScreen(\"s1\")\n"));
}

#[test]
fn test_option_order_follows_declaration() {
    let labels = ["delta", "alpha", "charlie", "bravo"];
    let template = Template::builder("ordered")
        .screen(
            Screen::new(ScreenId(1), "menu", "Pick one")
                .with_options(labels.iter().map(|l| DialogOption::new(*l))),
        )
        .build()
        .unwrap();
    let script = generate_definition_script(&template).unwrap();

    let positions: Vec<usize> = labels
        .iter()
        .map(|l| script.find(&format!("{{\"{}\", \"\"}}", l)).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_unresolved_target_renders_empty() {
    let template = Template::builder("dangling")
        .screen(
            Screen::new(ScreenId(1), "start", "Hi")
                .with_option(DialogOption::new("Go").leads_to(ScreenId(42))),
        )
        .build()
        .unwrap();
    let script = generate_definition_script(&template).expect("Dangling links are not errors");
    assert!(script.contains("        {\"Go\", \"\"}\n"));
}

#[test]
fn test_cyclic_links_emit_once_per_screen() {
    let template = create_vendor_template();
    let script = generate_definition_script(&template).unwrap();
    assert_eq!(script.matches("greet = ConvoScreen:new").count(), 1);
    assert_eq!(script.matches("wares = ConvoScreen:new").count(), 1);
}

#[test]
fn test_literal_text_is_escaped() {
    let template = Template::builder("quotes")
        .screen(
            Screen::new(ScreenId(1), "start", "He said \"hi\"\nthen left")
                .with_option(DialogOption::new("C:\\path")),
        )
        .build()
        .unwrap();
    let script = generate_definition_script(&template).unwrap();
    assert!(script.contains(r#"customDialogText = "He said \"hi\"\nthen left","#));
    assert!(script.contains(r#"{"C:\\path", ""}"#));
}

#[test]
fn test_handler_script_for_quest_template() {
    let template = create_quest_template();
    let script = generate_handler_script(&template).expect("Failed to generate");

    let expected = r#"local QuestManager = require("managers.quest.quest_manager")

quest_giver_convo_handler = conv_handler:new {}

function quest_giver_convo_handler:getInitialScreen(pPlayer, pNpc, pConvTemplate)
    local convoTemplate = LuaConversationTemplate(pConvTemplate)
    local playerID = SceneObject(pPlayer):getObjectID()
    local player = LuaCreatureObject(pPlayer)
    local pGhost = CreatureObject(pPlayer):getPlayerObject()

    if QuestManager.hasCompletedQuest(pPlayer, QuestManager.quests.FIND_RELIC) then
        return convoTemplate:getScreen("done")
    elseif QuestManager.hasActiveQuest(pPlayer, QuestManager.quests.FIND_RELIC) then
        return convoTemplate:getScreen("waiting")
    else
        return convoTemplate:getScreen("intro")
    end
end

function quest_giver_convo_handler:runScreenHandlers(pConvTemplate, pPlayer, pNpc, selectedOption, pConvScreen)
    local screen = LuaConversationScreen(pConvScreen)
    local screenID = screen:getScreenID()
    local playerID = CreatureObject(pPlayer):getObjectID()
    local pGhost = CreatureObject(pPlayer):getPlayerObject()

    if not SceneObject(pPlayer):isPlayerCreature() then
        return 0
    end

    if (pGhost == nil) then
        return 0
    end

    if screenID == "offer" then
        QuestManager.activateTask(pPlayer, QuestManager.quests.FIND_RELIC)
    elseif screenID == "reward" then
        QuestManager.completeQuest(pPlayer, QuestManager.quests.FIND_RELIC)
    end

    return pConvScreen
end
"#;
    assert_eq!(script, expected);
}

#[test]
fn test_probe_branch_uses_uppercased_reaction() {
    let template = Template::builder("probe")
        .screen(Screen::new(ScreenId(1), "start", "Hi"))
        .screen(
            Screen::new(ScreenId(2), "known", "Welcome back")
                .with_trigger(QuestTrigger::new("hasQuestX", "reward_01")),
        )
        .build()
        .unwrap();
    let script = generate_handler_script(&template).unwrap();
    assert!(script.contains(
        "    if QuestManager.hasQuestX(pPlayer, QuestManager.quests.REWARD_01) then\n        return convoTemplate:getScreen(\"known\")\n"
    ));
}

#[test]
fn test_side_effect_screen_only_in_screen_handlers() {
    let template = Template::builder("task")
        .screen(
            Screen::new(ScreenId(1), "start", "Hi")
                .with_trigger(QuestTrigger::new("activateTask", "task_a")),
        )
        .build()
        .unwrap();
    let script = generate_handler_script(&template).unwrap();

    let split = script
        .find("runScreenHandlers")
        .expect("side-effect resolver is emitted");
    let (entry, side_effects) = script.split_at(split);
    assert!(!entry.contains("activateTask"));
    assert!(side_effects.contains(
        "    if screenID == \"start\" then\n        QuestManager.activateTask(pPlayer, QuestManager.quests.TASK_A)\n    end\n"
    ));
}

#[test]
fn test_no_probes_yields_only_default_branch() {
    let template = create_vendor_template();
    let script = generate_handler_script(&template).unwrap();

    let split = script.find("runScreenHandlers").unwrap();
    let entry = &script[..split];
    assert!(!entry.contains("if "));
    assert!(!entry.contains("else"));
    assert!(entry.contains(
        "    local pGhost = CreatureObject(pPlayer):getPlayerObject()\n\n    return convoTemplate:getScreen(\"greet\")\nend\n"
    ));

    // Without side-effect screens the handler falls straight through.
    assert!(script.ends_with("        return 0\n    end\n\n    return pConvScreen\nend\n"));
}

#[test]
fn test_first_matching_probe_wins_in_declared_order() {
    let template = create_quest_template();
    let script = generate_handler_script(&template).unwrap();
    let completed = script.find("hasCompletedQuest").unwrap();
    let active = script.find("hasActiveQuest").unwrap();
    assert!(completed < active);
    assert!(script.contains("    if QuestManager.hasCompletedQuest"));
    assert!(script.contains("    elseif QuestManager.hasActiveQuest"));
}

#[test]
fn test_custom_probe_prefix_and_module() {
    let template = create_quest_template();
    let script = ScriptEmitter::builder(&template)
        .with_probe_prefix("complete")
        .with_quest_module("quests.manager")
        .build()
        .handler()
        .unwrap();

    assert!(script.starts_with("local QuestManager = require(\"quests.manager\")\n"));
    let split = script.find("runScreenHandlers").unwrap();
    let (entry, side_effects) = script.split_at(split);
    assert!(entry.contains("if QuestManager.completeQuest"));
    assert!(side_effects.contains("QuestManager.hasActiveQuest"));
    assert!(side_effects.contains("QuestManager.activateTask"));
}

#[test]
fn test_emit_returns_both_scripts() {
    let template = create_quest_template();
    let scripts = ScriptEmitter::new(&template).emit().unwrap();
    assert_eq!(scripts.template_name, "quest_giver");
    assert_eq!(scripts.definition_file_name(), "quest_giver_conv.lua");
    assert_eq!(scripts.handler_file_name(), "quest_giver_conv_handler.lua");
    assert_eq!(
        scripts.definition,
        generate_definition_script(&template).unwrap()
    );
    assert_eq!(scripts.handler, generate_handler_script(&template).unwrap());
}

#[test]
fn test_generation_is_repeatable() {
    let template = create_quest_template();
    let first = ScriptEmitter::new(&template).emit().unwrap();
    let second = ScriptEmitter::new(&template).emit().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_blank_action_stays_out_of_both_resolvers() {
    let template = Template::builder("blank")
        .screen(
            Screen::new(ScreenId(1), "start", "Hi")
                .with_trigger(QuestTrigger::new("", "quest_a").with_journal("T", "D")),
        )
        .build()
        .unwrap();

    let handler = generate_handler_script(&template).unwrap();
    assert!(!handler.contains("QuestManager.(pPlayer"));
    assert!(!handler.contains("QUEST_A"));
    assert!(!handler.contains("screenID == \"start\""));
    assert!(task_rows(&template).is_empty());
}
