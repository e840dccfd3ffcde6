use super::lua_string;
use crate::template::{QuestTrigger, Screen, Template};

/// Builds the conversation handler with its entry resolver (`getInitialScreen`)
/// and side-effect resolver (`runScreenHandlers`).
pub(super) fn emit_handler(template: &Template, probe_prefix: &str, quest_module: &str) -> String {
    let handler = format!("{}_convo_handler", template.name());
    let mut out = String::new();

    out.push_str(&format!(
        "local QuestManager = require({})\n\n",
        lua_string(quest_module)
    ));
    out.push_str(&format!("{} = conv_handler:new {{}}\n\n", handler));

    emit_entry_resolver(&mut out, &handler, template, probe_prefix);
    out.push('\n');
    emit_side_effect_resolver(&mut out, &handler, template, probe_prefix);
    out
}

/// Screens whose trigger is (or is not) a read-only probe, in declared order.
fn triggered_screens<'t>(
    template: &'t Template,
    probe_prefix: &'t str,
    probes: bool,
) -> impl Iterator<Item = (&'t Screen, &'t QuestTrigger)> + 't {
    template.screens().iter().filter_map(move |screen| {
        screen
            .trigger()
            .filter(|t| t.action().starts_with(probe_prefix) == probes)
            .map(|t| (screen, t))
    })
}

fn quest_call(trigger: &QuestTrigger) -> String {
    format!(
        "QuestManager.{}(pPlayer, QuestManager.quests.{})",
        trigger.action(),
        trigger.reaction().to_uppercase()
    )
}

fn emit_entry_resolver(out: &mut String, handler: &str, template: &Template, probe_prefix: &str) {
    let fallback = format!(
        "return convoTemplate:getScreen({})\n",
        lua_string(template.entry_screen().name())
    );

    out.push_str(&format!(
        "function {}:getInitialScreen(pPlayer, pNpc, pConvTemplate)\n",
        handler
    ));
    out.push_str("    local convoTemplate = LuaConversationTemplate(pConvTemplate)\n");
    out.push_str("    local playerID = SceneObject(pPlayer):getObjectID()\n");
    out.push_str("    local player = LuaCreatureObject(pPlayer)\n");
    out.push_str("    local pGhost = CreatureObject(pPlayer):getPlayerObject()\n\n");

    let mut branches = 0;
    for (screen, trigger) in triggered_screens(template, probe_prefix, true) {
        let keyword = if branches == 0 { "if" } else { "elseif" };
        out.push_str(&format!("    {} {} then\n", keyword, quest_call(trigger)));
        out.push_str(&format!(
            "        return convoTemplate:getScreen({})\n",
            lua_string(screen.name())
        ));
        branches += 1;
    }

    if branches > 0 {
        out.push_str("    else\n");
        out.push_str(&format!("        {}", fallback));
        out.push_str("    end\n");
    } else {
        out.push_str(&format!("    {}", fallback));
    }
    out.push_str("end\n");
}

fn emit_side_effect_resolver(
    out: &mut String,
    handler: &str,
    template: &Template,
    probe_prefix: &str,
) {
    out.push_str(&format!(
        "function {}:runScreenHandlers(pConvTemplate, pPlayer, pNpc, selectedOption, pConvScreen)\n",
        handler
    ));
    out.push_str("    local screen = LuaConversationScreen(pConvScreen)\n");
    out.push_str("    local screenID = screen:getScreenID()\n");
    out.push_str("    local playerID = CreatureObject(pPlayer):getObjectID()\n");
    out.push_str("    local pGhost = CreatureObject(pPlayer):getPlayerObject()\n\n");
    out.push_str("    if not SceneObject(pPlayer):isPlayerCreature() then\n");
    out.push_str("        return 0\n");
    out.push_str("    end\n\n");
    out.push_str("    if (pGhost == nil) then\n");
    out.push_str("        return 0\n");
    out.push_str("    end\n\n");

    let mut branches = 0;
    for (screen, trigger) in triggered_screens(template, probe_prefix, false) {
        let keyword = if branches == 0 { "if" } else { "elseif" };
        out.push_str(&format!(
            "    {} screenID == {} then\n",
            keyword,
            lua_string(screen.name())
        ));
        out.push_str(&format!("        {}\n", quest_call(trigger)));
        branches += 1;
    }
    if branches > 0 {
        out.push_str("    end\n\n");
    }

    out.push_str("    return pConvScreen\n");
    out.push_str("end\n");
}
