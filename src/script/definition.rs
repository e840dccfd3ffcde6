use itertools::{Itertools, Position};

use super::{lua_comment, lua_string};
use crate::template::{DialogOption, Screen, Template};

/// Builds the conversation definition: the template declaration, one block per
/// screen in declared order, and the registration statement.
pub(super) fn emit_definition(template: &Template) -> String {
    let name = template.name();
    let mut out = String::new();

    out.push_str(&format!("{}_convo_template = ConvoTemplate:new {{\n", name));
    out.push_str(&format!(
        "    initialScreen = {},\n",
        lua_string(template.entry_screen().name())
    ));
    out.push_str("    templateType = \"Lua\",\n");
    out.push_str(&format!(
        "    luaClassHandler = {},\n",
        lua_string(&format!("{}_convo_handler", name))
    ));
    out.push_str("    screens = {}\n");
    out.push_str("}\n\n");

    for screen in template.screens() {
        emit_screen(&mut out, template, screen);
    }

    out.push_str(&format!(
        "addConversationTemplate({}, {}_convo_template);\n",
        lua_string(&format!("{}_convo_template", name)),
        name
    ));
    out
}

fn emit_screen(out: &mut String, template: &Template, screen: &Screen) {
    let localized = template.is_localized();

    out.push_str(&format!("{} = ConvoScreen:new {{\n", screen.name()));
    out.push_str(&format!("    id = {},\n", lua_string(screen.name())));

    match screen.key() {
        Some(key) if localized => out.push_str(&format!(
            "    leftDialog = {}, -- {}\n",
            lua_string(key),
            lua_comment(screen.text())
        )),
        _ => out.push_str(&format!(
            "    customDialogText = {},\n",
            lua_string(screen.text())
        )),
    }

    out.push_str(&format!(
        "    stopConversation = \"{}\",\n",
        screen.is_terminal()
    ));
    out.push_str("    options = {\n");

    // Options keep their authored order; the runtime selects them by position.
    for (position, option) in screen.options().iter().with_position() {
        let mut line = format!(
            "        {{{}, {}}}",
            lua_string(option_text(option, localized)),
            lua_string(&option_target(template, screen, option))
        );
        if !matches!(position, Position::Last | Position::Only) {
            line.push(',');
        }
        if localized {
            line.push_str(&format!(" -- {}", lua_comment(option.text())));
        }
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str("    }\n");
    out.push_str("}\n");
    out.push_str(&format!(
        "{}_convo_template:addScreen({});\n\n",
        template.name(),
        screen.name()
    ));
}

fn option_text(option: &DialogOption, localized: bool) -> &str {
    match option.key() {
        Some(key) if localized => key,
        _ => option.text(),
    }
}

fn option_target(template: &Template, screen: &Screen, option: &DialogOption) -> String {
    match (option.target(), template.resolve_target(option)) {
        (_, Some(target)) => target.name().to_string(),
        (Some(missing), None) => {
            tracing::warn!(
                template = %template.name(),
                screen = %screen.name(),
                missing_screen = %missing,
                "option links to a screen outside the template; ending conversation instead"
            );
            String::new()
        }
        (None, None) => String::new(),
    }
}
