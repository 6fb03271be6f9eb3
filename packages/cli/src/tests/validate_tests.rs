use modelpin_pins::{PinStatus, StalePin};
use pretty_assertions::assert_eq;

use super::{state_with_pins, test_manager};
use crate::error::CliError;
use crate::validate::{validate_agent_pin, validate_pins};

fn stale(agent: &str, model: &str) -> StalePin {
    StalePin {
        agent: agent.to_string(),
        model: model.to_string(),
    }
}

#[tokio::test]
async fn test_validate_fails_while_stale_pins_remain() {
    let manager = test_manager(state_with_pins(&[
        ("coder", "o3"),
        ("planner", "retired-model"),
    ]));

    let report = validate_pins(&manager, false).await.unwrap();

    assert!(report.removed.is_empty());
    assert_eq!(report.stale, vec![stale("planner", "retired-model")]);
    let err = report.ensure_clean().unwrap_err();
    assert!(matches!(err, CliError::StalePins { count: 1 }));
    assert_eq!(
        err.to_string(),
        "1 stale pin(s) found. Run 'modelpin validate --fix' to remove them"
    );
}

#[tokio::test]
async fn test_validate_fix_removes_stale_pins_and_passes() {
    let manager = test_manager(state_with_pins(&[
        ("coder", "o3"),
        ("planner", "retired-model"),
    ]));

    let report = validate_pins(&manager, true).await.unwrap();

    assert_eq!(report.removed, vec![stale("planner", "retired-model")]);
    assert!(report.stale.is_empty());
    assert!(report.ensure_clean().is_ok());
    assert_eq!(manager.get_pin("coder").await.unwrap(), Some("o3".into()));
}

#[tokio::test]
async fn test_validate_ignores_orphaned_pins() {
    let manager = test_manager(state_with_pins(&[("deleted-agent", "retired-model")]));

    let report = validate_pins(&manager, true).await.unwrap();

    assert!(report.removed.is_empty());
    assert!(report.ensure_clean().is_ok());
    assert_eq!(manager.list_pins().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_validate_single_agent() {
    let manager = test_manager(state_with_pins(&[
        ("coder", "o3"),
        ("planner", "retired-model"),
    ]));

    let coder = validate_agent_pin(&manager, "coder", false).await.unwrap();
    assert_eq!(coder.status, PinStatus::Valid("o3".into()));
    assert!(coder.ensure_clean().is_ok());

    let planner = validate_agent_pin(&manager, "planner", false).await.unwrap();
    assert_eq!(planner.status, PinStatus::Stale("retired-model".into()));
    assert!(matches!(
        planner.ensure_clean(),
        Err(CliError::StalePin { agent, model }) if agent == "planner" && model == "retired-model"
    ));

    let fixed = validate_agent_pin(&manager, "planner", true).await.unwrap();
    assert_eq!(fixed.removed, Some("retired-model".to_string()));
    assert_eq!(fixed.status, PinStatus::Unpinned);
    assert!(fixed.ensure_clean().is_ok());
}

#[tokio::test]
async fn test_validate_unknown_agent_is_an_error() {
    let manager = test_manager(state_with_pins(&[]));
    let err = validate_agent_pin(&manager, "ghost", false).await.unwrap_err();
    assert!(matches!(err, CliError::Pin(_)));
}
