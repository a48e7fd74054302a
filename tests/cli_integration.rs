#[allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

const TODAY: &str = "2024-01-12";

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ngoboard").expect("binary");
        cmd.current_dir(self.dir.path())
            .env("NGOBOARD_HOME", self.dir.path())
            .env("NGOBOARD_TODAY", TODAY)
            .env("NGOBOARD_AI_URL", "http://127.0.0.1:9/v1beta")
            .env_remove("GEMINI_API_KEY")
            .env_remove("NGOBOARD_LOG");
        cmd
    }

    fn parse(stdout: &[u8]) -> Value {
        let stdout = String::from_utf8_lossy(stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"))
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut a: Vec<&str> = args.to_vec();
        a.push("--json");
        let output = self.cmd().args(&a).output().expect("run");
        Self::parse(&output.stdout)
    }

    fn run_json_stdin(&self, args: &[&str], stdin: &str) -> Value {
        let mut a: Vec<&str> = args.to_vec();
        a.push("--json");
        let output = self.cmd().args(&a).write_stdin(stdin).output().expect("run");
        Self::parse(&output.stdout)
    }

    fn run_ok(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], true, "expected success=true: {v}");
        v
    }

    fn run_err(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], false, "expected success=false: {v}");
        v
    }

    fn project_progress(&self, id: &str) -> u64 {
        let v = self.run_ok(&["project", "show", id]);
        v["data"]["progress"].as_u64().unwrap()
    }

    fn write_raw_snapshot(&self, raw: &str) {
        let conn = rusqlite::Connection::open(self.dir.path().join("ngoboard.db")).expect("open db");
        conn.execute(
            "INSERT INTO storage (key, value) VALUES ('projectHive_data', ?1)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [raw],
        )
        .expect("write snapshot");
    }
}

fn titles(v: &Value) -> Vec<String> {
    v["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

// ─── 1. init and seed data ─────────────────────────────────────────

#[test]
fn test_seed_shown_before_anything_is_stored() {
    let env = TestEnv::new();
    let v = env.run_ok(&["project", "list"]);
    assert_eq!(
        titles(&v),
        vec!["Clean Water Initiative", "Education for All", "Urban Garden Project"]
    );
    let progress: Vec<u64> = v["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["progress"].as_u64().unwrap())
        .collect();
    assert_eq!(progress, vec![50, 50, 0]);
}

#[test]
fn test_init_stores_seed_once() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init"]);
    assert_eq!(v["data"]["seeded"], true);
    assert_eq!(v["data"]["projects"], 3);
    assert!(v["data"]["path"].as_str().unwrap().ends_with("ngoboard.db"));

    let v = env.run_ok(&["init"]);
    assert_eq!(v["data"]["seeded"], false);
}

#[test]
fn test_init_reset_restores_seed() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    env.run_ok(&["project", "delete", "3", "--yes"]);
    assert_eq!(titles(&env.run_ok(&["project", "list"])).len(), 2);

    let v = env.run_err(&["init", "--reset"]);
    assert_eq!(v["error"]["code"], "ABORTED");

    let v = env.run_ok(&["init", "--reset", "--yes"]);
    assert_eq!(v["data"]["seeded"], true);
    assert_eq!(titles(&env.run_ok(&["project", "list"])).len(), 3);
}

#[test]
fn test_corrupt_state_is_reported() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    env.write_raw_snapshot("{not json");

    let v = env.run_err(&["project", "list"]);
    assert_eq!(v["error"]["code"], "CORRUPT_STATE");

    // reset clears it without having to parse it
    env.run_ok(&["init", "--reset", "--yes"]);
    env.run_ok(&["project", "list"]);
}

#[test]
fn test_reads_timestamp_due_dates() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    env.write_raw_snapshot(
        r#"[{"id":"p-1","title":"Food Bank","description":"","startDate":"2024-01-01",
        "endDate":"2024-06-01","progress":99,"tasks":[{"id":"t-1","title":"Sort cans",
        "assignee":"Unassigned","status":"Done","priority":"Low",
        "dueDate":"2024-02-01T08:00:00.000Z"}],"kpi":{"beneficiaries":0,"volunteers":0,"budget":0}}]"#,
    );
    let v = env.run_ok(&["task", "show", "t-1"]);
    assert_eq!(v["data"]["due_date"], "2024-02-01");
    assert_eq!(v["data"]["status"], "done");
}

// ─── 2. progress recomputation ─────────────────────────────────────

#[test]
fn test_progress_follows_every_task_change() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    assert_eq!(env.project_progress("1"), 50);

    // 2 of 5 done
    let v = env.run_ok(&["task", "add", "Water quality test", "--project", "1"]);
    let new_id = v["data"]["task"]["id"].as_str().unwrap().to_string();
    assert_eq!(v["data"]["task"]["status"], "todo");
    assert_eq!(v["data"]["task"]["assignee"], "Unassigned");
    assert_eq!(v["data"]["task"]["priority"], "medium");
    assert_eq!(v["data"]["task"]["due_date"], "2024-03-01");
    assert_eq!(v["data"]["project"]["progress"], 40);

    // t4 todo -> done: 3 of 5
    let v = env.run_ok(&["task", "move", "t4", "done"]);
    assert_eq!(v["data"]["status"], "done");
    assert_eq!(v["data"]["project_progress"], 60);

    // drop the in-progress t3: 3 of 4
    let v = env.run_ok(&["task", "delete", "t3", "--yes"]);
    assert_eq!(v["data"]["project"]["progress"], 75);

    // the added task is still there and still todo
    let v = env.run_ok(&["task", "show", &new_id]);
    assert_eq!(v["data"]["status"], "todo");
    assert_eq!(env.project_progress("1"), 75);
}

#[test]
fn test_move_and_revert() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);

    let v = env.run_ok(&["task", "move", "t7", "done"]);
    assert_eq!(v["data"]["project_progress"], 100);

    let v = env.run_ok(&["task", "revert", "t7"]);
    assert_eq!(v["data"]["status"], "in_progress");
    assert_eq!(v["data"]["project_progress"], 0);

    env.run_ok(&["task", "revert", "t7"]);
    let v = env.run_err(&["task", "revert", "t7"]);
    assert_eq!(v["error"]["code"], "INVALID_STATUS_TRANSITION");
}

#[test]
fn test_advance_done_task_is_rejected() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_err(&["task", "advance", "t1"]);
    assert_eq!(v["error"]["code"], "INVALID_STATUS_TRANSITION");
    assert_eq!(env.project_progress("1"), 50);

    let v = env.run_ok(&["task", "advance", "t4"]);
    assert_eq!(v["data"]["status"], "in_progress");
    let v = env.run_ok(&["task", "advance", "t4"]);
    assert_eq!(v["data"]["status"], "done");
    assert_eq!(v["data"]["project_progress"], 75);
}

#[test]
fn test_edit_status_recomputes() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&["task", "edit", "t6", "--status", "done", "--assignee", "Mike T. & Ana"]);
    assert_eq!(v["data"]["assignee"], "Mike T. & Ana");
    assert_eq!(v["data"]["project_progress"], 100);

    let v = env.run_err(&["task", "edit", "t6"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "edit", "t6", "--title", "  "]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

// ─── 3. task creation ──────────────────────────────────────────────

#[test]
fn test_blank_title_is_a_no_op() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&["task", "add", "   ", "--project", "2"]);
    assert!(v["data"]["task"].is_null());
    assert_eq!(v["data"]["project"]["progress"], 50);

    let v = env.run_ok(&["task", "list", "--project", "2"]);
    assert_eq!(v["data"].as_array().unwrap().len(), 2);

    env.cmd()
        .args(["task", "add", "", "--project", "2"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_task_add_unknown_project() {
    let env = TestEnv::new();
    let v = env.run_err(&["task", "add", "X", "--project", "nowhere"]);
    assert_eq!(v["error"]["code"], "PROJECT_NOT_FOUND");
}

#[test]
fn test_task_list_filters() {
    let env = TestEnv::new();
    let v = env.run_ok(&["task", "list", "--status", "in_progress"]);
    let ids: Vec<&str> = v["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["t3", "t6", "t7"]);

    let v = env.run_ok(&["task", "list", "--project", "water", "--status", "done"]);
    assert_eq!(v["data"].as_array().unwrap().len(), 2);
    assert_eq!(v["data"][0]["project_title"], "Clean Water Initiative");
}

// ─── 4. projects ───────────────────────────────────────────────────

#[test]
fn test_create_with_goal_falls_back_without_ai() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&[
        "project", "create", "Clinic Outreach",
        "--start", "2024-02-01", "--end", "2024-08-01",
        "--goal", "Bring mobile clinics to 3 districts",
        "--budget", "12000",
    ]);
    assert_eq!(v["data"]["title"], "Clinic Outreach");
    assert_eq!(v["data"]["description"], "Bring mobile clinics to 3 districts");
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 0);
    assert_eq!(v["data"]["progress"], 0);
    assert_eq!(v["data"]["kpi"]["budget"], 12000.0);
    assert_eq!(
        v["data"]["notice"],
        "Failed to generate plan with AI. Creating basic project."
    );

    // new projects go first
    let v = env.run_ok(&["project", "list"]);
    assert_eq!(titles(&v)[0], "Clinic Outreach");
}

#[test]
fn test_create_with_goal_survives_unreachable_service() {
    let env = TestEnv::new();
    let output = env
        .cmd()
        .env("GEMINI_API_KEY", "test-key")
        .args([
            "project", "create", "Clinic Outreach",
            "--start", "2024-02-01", "--end", "2024-08-01",
            "--goal", "Mobile clinics",
        ])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to generate plan with AI"), "stderr: {stderr}");
    assert!(stderr.contains("Drafting a plan"), "stderr: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Drafting"), "stdout: {stdout}");
    assert!(stdout.contains("Created project: Clinic Outreach"), "stdout: {stdout}");
    assert_eq!(titles(&env.run_ok(&["project", "list"]))[0], "Clinic Outreach");
}

#[test]
fn test_create_validation() {
    let env = TestEnv::new();
    let v = env.run_err(&["project", "create", "Backwards", "--start", "2024-05-01", "--end", "2024-01-01"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["project", "create", " ", "--start", "2024-01-01", "--end", "2024-02-01"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_import_maps_plan_tasks() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let plan = serde_json::json!({
        "description": "Rooftop gardens for food security.",
        "tasks": [
            {"title": "Scout roofs", "priority": "High", "assignee": "Coordinator"},
            {"title": "Buy soil", "priority": "Medium", "assignee": "Field Officer", "status": "Done"},
            {"title": "Rally volunteers", "priority": "Urgent", "assignee": ""}
        ],
        "kpi": {"beneficiaries": 500, "volunteers": 25}
    });
    let v = env.run_json_stdin(
        &["project", "import", "Rooftops", "--start", "2024-03-01", "--end", "2024-09-30", "--budget", "2500"],
        &plan.to_string(),
    );
    assert_eq!(v["success"], true, "{v}");
    let tasks = v["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 3);
    assert!(tasks.iter().all(|t| t["status"] == "todo"));
    assert!(tasks.iter().all(|t| t["due_date"] == "2024-09-30"));
    assert_eq!(tasks[0]["priority"], "high");
    assert_eq!(tasks[2]["priority"], "low");
    assert_eq!(tasks[2]["assignee"], "Unassigned");
    assert_eq!(v["data"]["kpi"]["beneficiaries"], 500);
    assert_eq!(v["data"]["kpi"]["budget"], 2500.0);
    assert_eq!(v["data"]["progress"], 0);
}

#[test]
fn test_import_rejects_bad_json() {
    let env = TestEnv::new();
    let v = env.run_json_stdin(
        &["project", "import", "X", "--start", "2024-03-01", "--end", "2024-09-30"],
        "not a plan",
    );
    assert_eq!(v["success"], false);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_edit_settings_keeps_progress() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&["project", "edit", "education", "--volunteers", "45", "--budget", "16000.5"]);
    assert_eq!(v["data"]["kpi"]["volunteers"], 45);
    assert_eq!(v["data"]["kpi"]["budget"], 16000.5);
    assert_eq!(v["data"]["progress"], 50);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 2);

    let v = env.run_err(&["project", "edit", "2", "--budget", "-5"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_ambiguous_project_reference() {
    let env = TestEnv::new();
    let v = env.run_err(&["project", "show", "an"]);
    assert_eq!(v["error"]["code"], "AMBIGUOUS_REF");
}

// ─── 5. deletion with confirmation ─────────────────────────────────

#[test]
fn test_delete_project_declined_keeps_data() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_json_stdin(&["project", "delete", "1"], "n\n");
    assert_eq!(v["success"], false);
    assert_eq!(v["error"]["code"], "ABORTED");
    assert_eq!(titles(&env.run_ok(&["project", "list"])).len(), 3);
}

#[test]
fn test_delete_project_confirmed_removes_tasks() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_json_stdin(&["project", "delete", "1"], "y\n");
    assert_eq!(v["data"]["deleted"], true);

    let v = env.run_err(&["task", "show", "t1"]);
    assert_eq!(v["error"]["code"], "TASK_NOT_FOUND");
    let v = env.run_err(&["project", "show", "1"]);
    assert_eq!(v["error"]["code"], "PROJECT_NOT_FOUND");
}

#[test]
fn test_delete_task_declined() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_err(&["task", "delete", "t4"]);
    assert_eq!(v["error"]["code"], "ABORTED");
    assert_eq!(env.project_progress("1"), 50);
}

// ─── 6. documents ──────────────────────────────────────────────────

#[test]
fn test_documents() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&["doc", "add", "Budget.xlsx", "--project", "2"]);
    assert_eq!(
        v["data"]["type"],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(v["data"]["upload_date"], TODAY);
    let doc_id = v["data"]["id"].as_str().unwrap().to_string();

    let v = env.run_ok(&["doc", "list", "--project", "2"]);
    assert_eq!(v["data"].as_array().unwrap().len(), 1);

    env.run_ok(&["doc", "delete", &doc_id, "--yes"]);
    let v = env.run_ok(&["doc", "list", "--project", "2"]);
    assert_eq!(v["data"].as_array().unwrap().len(), 0);

    let v = env.run_err(&["doc", "delete", "missing", "--yes"]);
    assert_eq!(v["error"]["code"], "DOCUMENT_NOT_FOUND");
}

// ─── 7. report and calendar ────────────────────────────────────────

#[test]
fn test_report_aggregates() {
    let env = TestEnv::new();
    let v = env.run_ok(&["report"]);
    let d = &v["data"];
    assert_eq!(d["total_projects"], 3);
    assert_eq!(d["active_projects"], 3);
    assert_eq!(d["total_tasks"], 7);
    assert_eq!(d["by_status"]["todo"], 1);
    assert_eq!(d["by_status"]["in_progress"], 3);
    assert_eq!(d["by_status"]["done"], 3);
    assert_eq!(d["completion_rate"], 43);
    assert_eq!(d["average_progress"], 33);
    assert_eq!(d["kpi"]["beneficiaries"], 2050);
    assert_eq!(d["kpi"]["volunteers"], 80);
    assert_eq!(d["kpi"]["budget"], 85000.0);
    // t3 is due 2024-01-15, inside the 7-day window
    assert_eq!(d["upcoming_deadlines"], 1);
    assert_eq!(d["upcoming"][0]["id"], "t3");
    assert!(d.get("summary").is_none());
}

#[test]
fn test_report_completed_project_is_not_active() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    env.run_ok(&["task", "move", "t7", "done"]);
    let v = env.run_ok(&["report"]);
    assert_eq!(v["data"]["active_projects"], 2);
}

#[test]
fn test_report_ai_placeholder() {
    let env = TestEnv::new();
    let v = env.run_ok(&["report", "--ai"]);
    assert_eq!(v["data"]["summary"], "Unable to generate analysis at this time.");
}

#[test]
fn test_calendar_month() {
    let env = TestEnv::new();
    let v = env.run_ok(&["calendar", "--month", "2024-02"]);
    assert_eq!(v["data"]["month"], "2024-02");
    let days = v["data"]["days"].as_array().unwrap();
    let dates: Vec<&str> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2024-02-15", "2024-02-28"]);

    let v = env.run_ok(&["calendar", "--month", "2024-02", "--project", "education"]);
    assert_eq!(v["data"]["days"].as_array().unwrap().len(), 1);

    // defaults to the pinned month
    let v = env.run_ok(&["calendar"]);
    assert_eq!(v["data"]["month"], "2024-01");
    assert_eq!(v["data"]["days"][0]["tasks"][0]["id"], "t3");

    let v = env.run_err(&["calendar", "--month", "2024-13"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

// ─── 8. text output ────────────────────────────────────────────────

#[test]
fn test_text_output() {
    let env = TestEnv::new();
    env.cmd()
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized ngoboard at"));

    env.cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Clean Water Initiative"));

    env.cmd()
        .args(["task", "show", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Task not found"));
}

#[test]
fn test_version_is_stamped() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ngoboard ").and(predicate::str::is_match(r"ngoboard \S+").unwrap()));
}

#[test]
fn test_bad_arguments_exit_2() {
    let env = TestEnv::new();
    let output = env.cmd().args(["task", "move", "t1", "blocked"]).output().expect("run");
    assert_eq!(output.status.code(), Some(2));
}
