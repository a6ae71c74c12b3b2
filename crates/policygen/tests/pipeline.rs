use policygen::config::PolicygenConfig;
use policygen::{FetchError, TranslationSource};
use policygen_render::LanguageTranslations;
use std::path::Path;
use tempfile::TempDir;

const UPDATE_CONTRIBUTION: &str = r#"
import { localize } from '../../../nls.js';

configurationRegistry.registerConfiguration({
	id: 'update',
	order: 15,
	title: localize('updateConfigurationTitle', "Update"),
	type: 'object',
	properties: {
		'update.mode': {
			type: 'string',
			enum: ['none', 'manual', 'start', 'default'],
			default: 'default',
			scope: ConfigurationScope.APPLICATION,
			description: localize('updateMode', "Configure whether you receive automatic updates."),
			tags: ['usesOnlineServices'],
			enumDescriptions: [
				localize('none', "Disable updates."),
				localize('manual', "Disable automatic background update checks."),
				localize('start', "Check for updates only on startup."),
				localize('default', "Enable automatic update checks.")
			],
			policy: {
				name: 'UpdateMode',
				category: localize('update', "Update"),
				minimumVersion: '1.67',
			}
		},
	}
});
"#;

const TELEMETRY_CONTRIBUTION: &str = r#"
Registry.as<IConfigurationRegistry>(Extensions.Configuration).registerConfiguration({
	'properties': {
		'telemetry.telemetryLevel': {
			'type': 'string',
			'enum': ['all', 'off'],
			'enumDescriptions': [
				localize('telemetry.telemetryLevel.default', "Sends usage data."),
				localize('telemetry.telemetryLevel.off', "Disables all telemetry."),
			],
			'markdownDescription': 'unused',
			'description': localize('telemetry.telemetryLevel.policyDescription', "Controls telemetry."),
			'policy': {
				name: 'TelemetryLevel',
				minimumVersion: '1.99',
				category: localize('update', "Update"),
			}
		}
	}
});
"#;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "product.json",
        r#"{ "nameLong": "Code - OSS", "win32RegValueName": "CodeOSS" }"#,
    );
    write(root, "package.json", r#"{ "version": "1.99.2" }"#);
    write(
        root,
        "src/vs/platform/update/common/update.config.contribution.ts",
        UPDATE_CONTRIBUTION,
    );
    write(
        root,
        "src/vs/platform/telemetry/common/telemetry.contribution.ts",
        TELEMETRY_CONTRIBUTION,
    );
    write(
        root,
        "src/vs/platform/update/test/update.test.ts",
        &UPDATE_CONTRIBUTION.replace("'string'", "'boolean'"),
    );
    dir
}

fn config(languages: &[&str]) -> PolicygenConfig {
    let mut config = PolicygenConfig::default();
    config.translations.languages = Some(languages.iter().map(|l| l.to_string()).collect());
    config
}

/// French for the update module only; German is unavailable.
struct StubSource;

impl TranslationSource for StubSource {
    fn fetch(&self, language_id: &str, version: &str) -> Result<LanguageTranslations, FetchError> {
        assert_eq!(version, "1.99.0");
        match language_id {
            "fr" => {
                let mut table = LanguageTranslations::new();
                table.insert(
                    "vs/platform/update/common/update.config.contribution",
                    "updateMode",
                    "Configurer les mises à jour automatiques.",
                );
                Ok(table)
            }
            _ => Err(FetchError::Decode(std::io::Error::other("offline"))),
        }
    }
}

fn string_text(adml: &str, id: &str) -> String {
    let doc = roxmltree::Document::parse(adml).unwrap();
    doc.descendants()
        .find(|n| n.has_tag_name("string") && n.attribute("id") == Some(id))
        .and_then(|n| n.text())
        .unwrap_or_default()
        .to_string()
}

#[test]
fn generates_all_documents() {
    let project = project();
    let root = project.path();
    let summary = policygen::run(root, &config(&["fr", "de"]), Some(&StubSource)).unwrap();

    assert_eq!(summary.files, 2);
    assert_eq!(summary.policies, 2);
    assert_eq!(summary.categories, 1);

    let out = root.join(".build/policies/win32");
    let relative: Vec<_> = summary
        .written
        .iter()
        .map(|p| p.strip_prefix(&out).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(
        relative,
        ["CodeOSS.admx", "en-us/CodeOSS.adml", "de-de/CodeOSS.adml", "fr-fr/CodeOSS.adml"]
    );

    let admx = std::fs::read_to_string(out.join("CodeOSS.admx")).unwrap();
    let doc = roxmltree::Document::parse(&admx).unwrap();
    let policies: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("policy"))
        .filter_map(|n| n.attribute("name"))
        .collect();
    // Discovery order is by path: telemetry before update
    assert_eq!(policies, ["TelemetryLevel", "UpdateMode"]);
    let versions: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("definition"))
        .filter_map(|n| n.attribute("name"))
        .collect();
    assert_eq!(versions, ["Supported_1_67", "Supported_1_99"]);

    let english = std::fs::read_to_string(out.join("en-us/CodeOSS.adml")).unwrap();
    let french = std::fs::read_to_string(out.join("fr-fr/CodeOSS.adml")).unwrap();
    let german = std::fs::read_to_string(out.join("de-de/CodeOSS.adml")).unwrap();

    assert_eq!(
        string_text(&english, "UpdateMode_updateMode"),
        "Configure whether you receive automatic updates."
    );
    assert_eq!(
        string_text(&french, "UpdateMode_updateMode"),
        "Configurer les mises à jour automatiques."
    );
    assert_eq!(string_text(&french, "UpdateMode_none"), "Disable updates.");
    assert_eq!(german, english);
}

#[test]
fn unsupported_setting_writes_nothing() {
    let project = project();
    let root = project.path();
    write(
        root,
        "src/vs/workbench/contrib/chat/chat.contribution.ts",
        &UPDATE_CONTRIBUTION
            .replace("'string'", "'boolean'")
            .replace("UpdateMode", "ChatMode"),
    );

    let err = policygen::run(root, &config(&["fr"]), Some(&StubSource)).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("needs implementing"), "{message}");
    assert!(message.contains("vs/workbench/contrib/chat/chat.contribution"), "{message}");
    assert!(!root.join(".build").exists());
}

#[test]
fn translations_can_be_disabled() {
    let project = project();
    let root = project.path();
    let mut config = config(&["fr"]);
    config.translations.enabled = Some(false);
    config.output.json = Some("policies.json".into());

    let summary = policygen::run(root, &config, Some(&StubSource)).unwrap();
    assert_eq!(summary.written.len(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(root.join("policies.json")).unwrap())
            .unwrap();
    assert_eq!(json["policies"][0]["name"], "TelemetryLevel");
    assert_eq!(json["categories"][0]["name"]["value"], "Update");
}

#[test]
fn missing_template_falls_back_to_source_strings() {
    let project = project();
    let root = project.path();

    let summary = policygen::run(root, &config(&["ja"]), None).unwrap();
    let out = root.join(".build/policies/win32");
    let english = std::fs::read_to_string(out.join("en-us/CodeOSS.adml")).unwrap();
    let japanese = std::fs::read_to_string(out.join("ja-jp/CodeOSS.adml")).unwrap();
    assert_eq!(japanese, english);
    assert_eq!(summary.written.len(), 3);
}
