use std::path::Path;

use rulekit::config::RegistryConfig;
use rulekit::rules::{ActivationMatcher, load_rule_set};
use tempfile::TempDir;
use tokio::fs;

async fn write_rule(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.unwrap();
    }
    fs::write(path, content).await.unwrap();
}

async fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_rule(
        temp.path(),
        "000-always.mdc",
        "---\ndescription: Core conventions\nalwaysApply: true\n---\n<rule>Always on.</rule>\n",
    )
    .await;
    write_rule(
        temp.path(),
        "304-ts.mdc",
        "---\ndescription: TypeScript conventions\nglobs:\n  - \"*.ts\"\n  - \"*.tsx\"\nalwaysApply: false\n---\n<rule>Strict mode.</rule>\n",
    )
    .await;
    write_rule(
        temp.path(),
        "200-git/commit.mdc",
        "---\ndescription: Conventional Commits for every commit message\nalwaysApply: false\n---\n<rule>type(scope): subject</rule>\n",
    )
    .await;
    temp
}

#[tokio::test]
async fn test_spec_scenario_end_to_end() {
    let temp = fixture().await;
    let report = load_rule_set(temp.path(), &RegistryConfig::default())
        .await
        .unwrap();
    let matcher = ActivationMatcher::new(&report.rules);

    assert_eq!(
        matcher.for_path("src/app.tsx").paths(),
        vec!["000-always.mdc", "304-ts.mdc"]
    );
    assert_eq!(
        matcher.for_path("src/app.py").paths(),
        vec!["000-always.mdc"]
    );
}

#[tokio::test]
async fn test_action_keyword_activates_trigger_rule() {
    let temp = fixture().await;
    let report = load_rule_set(temp.path(), &RegistryConfig::default())
        .await
        .unwrap();
    let matcher = ActivationMatcher::new(&report.rules);

    let activation = matcher.activate("src/app.py", Some("commit"));
    assert_eq!(
        activation.paths(),
        vec!["000-always.mdc", "200-git/commit.mdc"]
    );
}

#[tokio::test]
async fn test_prompt_assembles_bodies_in_precedence_order() {
    let temp = fixture().await;
    let report = load_rule_set(temp.path(), &RegistryConfig::default())
        .await
        .unwrap();
    let matcher = ActivationMatcher::new(&report.rules);

    let prompt = matcher.for_path("src/app.ts").to_prompt();
    assert!(prompt.starts_with("# Active Rules"));
    assert!(prompt.contains("## 000-always.mdc"));
    assert!(prompt.contains("<rule>Always on.</rule>"));
    let always = prompt.find("000-always.mdc").unwrap();
    let ts = prompt.find("304-ts.mdc").unwrap();
    assert!(always < ts);
}

#[tokio::test]
async fn test_invalid_glob_degrades_single_rule() {
    let temp = fixture().await;
    write_rule(
        temp.path(),
        "100-broken.mdc",
        "---\ndescription: Broken globs\nglobs: \"src/[\"\nalwaysApply: false\n---\nbody\n",
    )
    .await;

    let report = load_rule_set(temp.path(), &RegistryConfig::default())
        .await
        .unwrap();
    assert_eq!(report.rules.len(), 4);

    let matcher = ActivationMatcher::new(&report.rules);
    assert_eq!(
        matcher.for_path("src/app.ts").paths(),
        vec!["000-always.mdc", "304-ts.mdc"]
    );
}

#[tokio::test]
async fn test_matching_is_pure_across_snapshots() {
    let temp = fixture().await;
    let report = load_rule_set(temp.path(), &RegistryConfig::default())
        .await
        .unwrap();
    let matcher = ActivationMatcher::new(&report.rules);

    let first = matcher.activate("src/app.tsx", Some("commit")).paths();
    let second = matcher.activate("src/app.tsx", Some("commit")).paths();
    assert_eq!(first, second);
}
