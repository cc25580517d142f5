//! `--json` output: the run report as a serde document.

use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use cogito_core::{Direction, Side, UserRecord};
use cogito_reconcile::{Action, LoadOutcome, RunReport, SideReport, SyncStatus};

#[derive(Serialize)]
struct RunReportJson<'a> {
    local: SideJson<'a>,
    server: SideJson<'a>,
    requested: Option<Direction>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    empty_side: Option<Side>,
    only_local: &'a [UserRecord],
    only_server: &'a [UserRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<ActionJson<'a>>,
}

#[derive(Serialize)]
struct SideJson<'a> {
    path: &'a PathBuf,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    user_count: usize,
    users: &'a [UserRecord],
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum ActionJson<'a> {
    Suggested {
        directions: &'a [Direction],
    },
    Refused {
        requested: Direction,
        suggestions: &'a [Direction],
    },
    Copied {
        direction: Direction,
        from: &'a PathBuf,
        to: &'a PathBuf,
        bytes: u64,
    },
    CopyFailed {
        direction: Direction,
        from: &'a PathBuf,
        to: &'a PathBuf,
        error: String,
    },
}

impl<'a> From<&'a SideReport> for SideJson<'a> {
    fn from(side: &'a SideReport) -> Self {
        let error = match &side.load {
            LoadOutcome::Failed(err) => Some(err.to_string()),
            LoadOutcome::Missing | LoadOutcome::Loaded(_) => None,
        };
        Self {
            path: &side.path,
            exists: side.exists,
            error,
            user_count: side.load.users().len(),
            users: side.load.users(),
        }
    }
}

impl<'a> From<&'a Action> for ActionJson<'a> {
    fn from(action: &'a Action) -> Self {
        match action {
            Action::Suggested(directions) => ActionJson::Suggested { directions },
            Action::Refused {
                requested,
                suggestions,
            } => ActionJson::Refused {
                requested: *requested,
                suggestions,
            },
            Action::Copied {
                direction,
                from,
                to,
                bytes,
            } => ActionJson::Copied {
                direction: *direction,
                from,
                to,
                bytes: *bytes,
            },
            Action::CopyFailed {
                direction,
                from,
                to,
                error,
            } => ActionJson::CopyFailed {
                direction: *direction,
                from,
                to,
                error: error.to_string(),
            },
        }
    }
}

fn to_json(report: &RunReport) -> RunReportJson<'_> {
    let mut json = RunReportJson {
        local: SideJson::from(&report.local),
        server: SideJson::from(&report.server),
        requested: report.requested,
        status: "nothing-to-compare",
        empty_side: None,
        only_local: &[],
        only_server: &[],
        action: None,
    };

    match &report.status {
        SyncStatus::InSync => json.status = "in-sync",
        SyncStatus::OutOfSync {
            comparison,
            empty_side,
            action,
        } => {
            json.status = "out-of-sync";
            json.empty_side = *empty_side;
            json.only_local = comparison.only_local.as_slice();
            json.only_server = comparison.only_server.as_slice();
            json.action = Some(ActionJson::from(action));
        }
        SyncStatus::NothingToCompare => {}
    }
    json
}

pub fn write_report(out: &mut impl Write, report: &RunReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &to_json(report))?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use cogito_core::Username;
    use cogito_reconcile::Comparison;

    use super::*;

    fn user(name: &str) -> UserRecord {
        UserRecord {
            id: 7,
            username: Username::from(name),
            email: format!("{name}@example.com"),
            role: "user".to_string(),
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn out_of_sync_report_carries_action_and_lists() {
        let report = RunReport {
            local: SideReport {
                side: Side::Local,
                path: PathBuf::from("data/cogito.db"),
                exists: true,
                load: LoadOutcome::Loaded(vec![user("ada")]),
            },
            server: SideReport {
                side: Side::Server,
                path: PathBuf::from("/opt/cogito/data/cogito.db"),
                exists: true,
                load: LoadOutcome::Loaded(vec![]),
            },
            requested: None,
            status: SyncStatus::OutOfSync {
                comparison: Comparison {
                    only_local: vec![user("ada")],
                    only_server: vec![],
                },
                empty_side: Some(Side::Server),
                action: Action::Suggested(vec![Direction::CopyToServer]),
            },
        };

        let mut buf = Vec::new();
        write_report(&mut buf, &report).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("parse");

        assert_eq!(value["status"], "out-of-sync");
        assert_eq!(value["empty_side"], "server");
        assert_eq!(value["local"]["user_count"], 1);
        assert_eq!(value["only_local"][0]["username"], "ada");
        assert_eq!(value["action"]["kind"], "suggested");
        assert_eq!(value["action"]["directions"][0], "copy-to-server");
    }

    #[test]
    fn in_sync_report_omits_action() {
        let report = RunReport {
            local: SideReport {
                side: Side::Local,
                path: PathBuf::from("a.db"),
                exists: true,
                load: LoadOutcome::Loaded(vec![]),
            },
            server: SideReport {
                side: Side::Server,
                path: PathBuf::from("b.db"),
                exists: false,
                load: LoadOutcome::Missing,
            },
            requested: Some(Direction::CopyToLocal),
            status: SyncStatus::InSync,
        };

        let value = serde_json::to_value(to_json(&report)).expect("to_value");

        assert_eq!(value["status"], "in-sync");
        assert_eq!(value["requested"], "copy-to-local");
        assert_eq!(value["server"]["exists"], false);
        assert!(value.get("action").is_none());
    }
}
