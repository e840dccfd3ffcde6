//! JSON shape of a template as exchanged with the editor and the HTTP API.

use serde::{Deserialize, Serialize};

use super::conversion::IntoTemplate;
use super::definition::{
    DEFAULT_KEY_PREFIX, DialogOption, QuestTrigger, Screen, ScreenId, Template, TemplateId,
};
use crate::error::ValidationError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TemplateSchema {
    #[serde(default)]
    pub id: Option<TemplateId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stf_mode: bool,
    #[serde(default = "default_prefix")]
    pub stf_path_prefix: String,
    #[serde(default)]
    pub initial_screen: Option<ScreenId>,
    #[serde(default)]
    pub screens: Vec<ScreenSchema>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScreenSchema {
    pub id: ScreenId,
    pub id_name: String,
    #[serde(default)]
    pub custom_dialog_text: String,
    #[serde(default, rename = "leftDialog")]
    pub left_dialog: Option<String>,
    #[serde(default)]
    pub stop_conversation: bool,
    #[serde(default)]
    pub task_action: Option<String>,
    #[serde(default)]
    pub task_reaction: Option<String>,
    #[serde(default)]
    pub task_title: Option<String>,
    #[serde(default)]
    pub task_description: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionSchema>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OptionSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "stfReference")]
    pub stf_reference: Option<String>,
    #[serde(default)]
    pub next_screen: Option<ScreenId>,
}

fn default_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

impl TemplateSchema {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl ScreenSchema {
    fn into_screen(self) -> Result<Screen, ValidationError> {
        let trigger = match self.task_action.filter(|a| !a.trim().is_empty()) {
            Some(action) => {
                let reaction = self.task_reaction.filter(|r| !r.trim().is_empty()).ok_or_else(
                    || ValidationError::MissingReaction {
                        screen: self.id_name.clone(),
                        action: action.clone(),
                    },
                )?;
                Some(QuestTrigger {
                    action,
                    reaction,
                    title: self.task_title,
                    description: self.task_description,
                })
            }
            None => None,
        };

        Ok(Screen {
            id: self.id,
            name: self.id_name,
            text: self.custom_dialog_text,
            key: self.left_dialog,
            terminal: self.stop_conversation,
            trigger,
            options: self
                .options
                .into_iter()
                .map(|o| DialogOption {
                    text: o.text,
                    key: o.stf_reference,
                    target: o.next_screen,
                })
                .collect(),
        })
    }
}

impl IntoTemplate for TemplateSchema {
    fn into_template(self) -> Result<Template, ValidationError> {
        let screens = self
            .screens
            .into_iter()
            .map(ScreenSchema::into_screen)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = Template::builder(self.name)
            .id(self.id.unwrap_or(TemplateId(0)))
            .localized(self.stf_mode)
            .key_prefix(self.stf_path_prefix)
            .screens(screens);
        if let Some(initial) = self.initial_screen {
            builder = builder.initial_screen(initial);
        }
        builder.build()
    }
}

impl From<&Template> for TemplateSchema {
    fn from(template: &Template) -> Self {
        Self {
            id: Some(template.id()),
            name: template.name().to_string(),
            stf_mode: template.is_localized(),
            stf_path_prefix: template.key_prefix().to_string(),
            initial_screen: template.initial_screen_id(),
            screens: template
                .screens()
                .iter()
                .map(|screen| {
                    let trigger = screen.trigger();
                    ScreenSchema {
                        id: screen.id(),
                        id_name: screen.name().to_string(),
                        custom_dialog_text: screen.text().to_string(),
                        left_dialog: screen.key().map(str::to_string),
                        stop_conversation: screen.is_terminal(),
                        task_action: trigger.map(|t| t.action().to_string()),
                        task_reaction: trigger.map(|t| t.reaction().to_string()),
                        task_title: trigger.and_then(|t| t.title()).map(str::to_string),
                        task_description: trigger
                            .and_then(|t| t.description())
                            .map(str::to_string),
                        options: screen
                            .options()
                            .iter()
                            .map(|option| OptionSchema {
                                id: None,
                                text: option.text().to_string(),
                                stf_reference: option.key().map(str::to_string),
                                next_screen: option.target(),
                            })
                            .collect(),
                    }
                })
                .collect(),
        }
    }
}
