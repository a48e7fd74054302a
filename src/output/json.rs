use serde_json::{json, Value};

use crate::error::NgoError;
use crate::models::{Document, Project, Task};
use crate::rules::agenda::AgendaDay;
use crate::rules::report::{DashboardStats, UpcomingTask};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &NgoError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "assignee": t.assignee,
        "assignee_avatar": t.assignee_avatar,
        "due_date": t.due_date.to_string(),
        "created_at": t.created_at,
        "status": t.status.as_str(),
        "priority": t.priority.as_str()
    })
}

pub fn task_with_project(t: &Task, p: &Project) -> Value {
    let mut v = task_json(t);
    v["project_id"] = json!(p.id);
    v["project_title"] = json!(p.title);
    v
}

pub fn document_json(d: &Document) -> Value {
    json!({
        "id": d.id,
        "name": d.name,
        "type": d.mime_type,
        "upload_date": d.upload_date
    })
}

pub fn kpi_json(p: &Project) -> Value {
    json!({
        "beneficiaries": p.kpi.beneficiaries,
        "volunteers": p.kpi.volunteers,
        "budget": p.kpi.budget
    })
}

pub fn project_summary(p: &Project) -> Value {
    json!({
        "id": p.id,
        "title": p.title,
        "start_date": p.start_date.to_string(),
        "end_date": p.end_date.to_string(),
        "progress": p.progress,
        "task_count": p.tasks.len(),
        "kpi": kpi_json(p)
    })
}

pub fn project_detail(p: &Project) -> Value {
    json!({
        "id": p.id,
        "title": p.title,
        "description": p.description,
        "start_date": p.start_date.to_string(),
        "end_date": p.end_date.to_string(),
        "progress": p.progress,
        "kpi": kpi_json(p),
        "tasks": p.tasks.iter().map(task_json).collect::<Vec<_>>(),
        "documents": p.documents.iter().map(document_json).collect::<Vec<_>>()
    })
}

fn upcoming_json(u: &UpcomingTask) -> Value {
    let mut v = task_json(&u.task);
    v["project_id"] = json!(u.project_id);
    v["project_title"] = json!(u.project_title);
    v
}

pub fn stats_json(s: &DashboardStats) -> Value {
    json!({
        "total_projects": s.total_projects,
        "active_projects": s.active_projects,
        "total_tasks": s.total_tasks,
        "by_status": {
            "todo": s.by_status.todo,
            "in_progress": s.by_status.in_progress,
            "done": s.by_status.done
        },
        "completion_rate": s.completion_rate,
        "average_progress": s.average_progress,
        "upcoming_deadlines": s.upcoming_deadlines(),
        "upcoming": s.upcoming.iter().map(upcoming_json).collect::<Vec<_>>(),
        "kpi": {
            "beneficiaries": s.kpi.beneficiaries,
            "volunteers": s.kpi.volunteers,
            "budget": s.kpi.budget
        }
    })
}

pub fn agenda_json(days: &[AgendaDay]) -> Value {
    json!(days
        .iter()
        .map(|d| json!({
            "date": d.date.to_string(),
            "tasks": d.entries.iter().map(|e| {
                let mut v = task_json(&e.task);
                v["project_id"] = json!(e.project_id);
                v["project_title"] = json!(e.project_title);
                v
            }).collect::<Vec<_>>()
        }))
        .collect::<Vec<_>>())
}
