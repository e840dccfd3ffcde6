//! Integration tests for convoforge
//!
//! End-to-end tests that go from a stored template to generated artifacts.
//!
mod common;
use common::*;
use convoforge::prelude::*;
use std::fs;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_workbench_generates_from_memory_source() {
        let source: InMemorySource = [create_vendor_template(), create_quest_template()]
            .into_iter()
            .collect();
        assert_eq!(source.len(), 2);
        let workbench = Workbench::new(source);

        let definition = workbench
            .definition_script(TemplateId(1))
            .expect("Failed to generate definition");
        assert_eq!(
            definition,
            generate_definition_script(&create_vendor_template()).unwrap()
        );

        let handler = workbench
            .handler_script(TemplateId(3))
            .expect("Failed to generate handler");
        assert!(handler.contains("quest_giver_convo_handler:getInitialScreen"));

        let scripts = workbench.scripts(TemplateId(3)).unwrap();
        assert_eq!(scripts.handler, handler);
    }

    #[test]
    fn test_workbench_reports_missing_template() {
        let workbench = Workbench::new(InMemorySource::new());
        match workbench.definition_script(TemplateId(99)) {
            Err(WorkbenchError::Source(SourceError::NotFound(id))) => {
                assert_eq!(id, TemplateId(99))
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_workbench_string_tables() {
        let mut source = InMemorySource::new();
        source.insert(create_localized_template());
        source.insert(create_quest_template());
        let workbench = Workbench::new(source);

        let table = workbench.string_table(TemplateId(2)).unwrap();
        let rows = conversation_rows(&create_localized_template()).unwrap();
        assert_eq!(table, encode_localization_table(&rows).unwrap());
        assert_eq!(&table[9..13], &[4, 0, 0, 0]);

        let tasks = workbench.task_table(TemplateId(3)).unwrap();
        assert_eq!(&tasks[9..13], &[2, 0, 0, 0]);

        // The quest template is not localized.
        assert!(matches!(
            workbench.string_table(TemplateId(3)),
            Err(WorkbenchError::Localization(LocalizationError::NotLocalized(_)))
        ));
    }

    #[test]
    fn test_workbench_custom_probe_prefix() {
        let source: InMemorySource = std::iter::once(create_quest_template()).collect();
        let workbench = Workbench::new(source).with_probe_prefix("complete");
        let handler = workbench.handler_script(TemplateId(3)).unwrap();
        let split = handler.find("runScreenHandlers").unwrap();
        assert!(handler[..split].contains("QuestManager.completeQuest"));
    }

    #[test]
    fn test_json_dir_source_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("7.json"), VENDOR_JSON).unwrap();
        fs::write(dir.path().join("8.json"), "{ not json").unwrap();
        fs::write(dir.path().join("9.json"), r#"{ "name": "empty", "screens": [] }"#).unwrap();

        let workbench = Workbench::new(JsonDirSource::new(dir.path()));

        let template = workbench.fetch(TemplateId(7)).unwrap();
        assert_eq!(template.id(), TemplateId(7));

        let definition = workbench.definition_script(TemplateId(7)).unwrap();
        assert!(definition.contains("leftDialog = \"@conversation/vendor:s_1\", -- Need anything?"));
        assert!(definition.contains("{\"@conversation/vendor:s_3\", \"\"} -- Bye."));

        let handler = workbench.handler_script(TemplateId(7)).unwrap();
        assert!(handler.contains("QuestManager.activateTask(pPlayer, QuestManager.quests.BROWSE_WARES)"));

        let table = workbench.string_table(TemplateId(7)).unwrap();
        assert_eq!(&table[9..13], &[4, 0, 0, 0]);

        assert!(matches!(
            workbench.fetch(TemplateId(1)),
            Err(WorkbenchError::Source(SourceError::NotFound(_)))
        ));
        assert!(matches!(
            workbench.fetch(TemplateId(8)),
            Err(WorkbenchError::Source(SourceError::Json(_)))
        ));
        assert!(matches!(
            workbench.fetch(TemplateId(9)),
            Err(WorkbenchError::Source(SourceError::Invalid(
                ValidationError::NoScreens(_)
            )))
        ));
    }

    #[test]
    fn test_scripts_save_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let scripts = ScriptEmitter::new(&create_vendor_template()).emit().unwrap();
        let (definition_path, handler_path) = scripts.save_to_dir(dir.path()).unwrap();

        assert!(definition_path.ends_with("vendor_conv.lua"));
        assert_eq!(fs::read_to_string(definition_path).unwrap(), scripts.definition);
        assert_eq!(fs::read_to_string(handler_path).unwrap(), scripts.handler);
    }

    #[test]
    fn test_generation_across_threads() {
        let template = std::sync::Arc::new(create_quest_template());
        let expected = generate_handler_script(&template).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let template = std::sync::Arc::clone(&template);
                std::thread::spawn(move || generate_handler_script(&template).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
