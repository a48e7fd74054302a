use crate::models::{Document, Project, Task};
use crate::rules::agenda::AgendaDay;
use crate::rules::report::DashboardStats;

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn print_project(p: &Project) {
    println!("Project: {} ({})", p.title, p.id);
    if !p.description.is_empty() {
        println!("  Description: {}", p.description);
    }
    println!("  Dates: {} → {}", p.start_date, p.end_date);
    println!("  Progress: {}% ({} tasks)", p.progress, p.tasks.len());
    println!(
        "  KPI: beneficiaries={} volunteers={} budget={:.2}",
        p.kpi.beneficiaries, p.kpi.volunteers, p.kpi.budget
    );
}

pub fn print_project_list(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }
    for p in projects {
        println!(
            "  {} ({}) {:>3}% - due {} [{} tasks]",
            p.title,
            short_id(&p.id),
            p.progress,
            p.end_date,
            p.tasks.len()
        );
    }
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    println!("  Status: {}", t.status.label());
    println!("  Priority: {}", t.priority.label());
    println!("  Assignee: {}", t.assignee);
    println!("  Due: {}", t.due_date);
    if let Some(ref created) = t.created_at {
        println!("  Created: {created}");
    }
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        println!(
            "  [{}] {} ({}) {} due {} @{}",
            t.status.as_str(),
            t.title,
            short_id(&t.id),
            t.priority.as_str(),
            t.due_date,
            t.assignee
        );
    }
}

pub fn print_documents(docs: &[Document]) {
    if docs.is_empty() {
        println!("No documents.");
        return;
    }
    for d in docs {
        println!("  {} ({}) {} uploaded {}", d.name, short_id(&d.id), d.mime_type, d.upload_date);
    }
}

pub fn print_stats(s: &DashboardStats) {
    println!("Projects: {} active / {} total", s.active_projects, s.total_projects);
    println!(
        "Tasks: {} total, todo={} in_progress={} done={}",
        s.total_tasks, s.by_status.todo, s.by_status.in_progress, s.by_status.done
    );
    println!("Task completion: {}%", s.completion_rate);
    println!("Average project progress: {}%", s.average_progress);
    println!(
        "Impact: beneficiaries={} volunteers={} budget={:.2}",
        s.kpi.beneficiaries, s.kpi.volunteers, s.kpi.budget
    );
    println!("Upcoming deadlines (7 days): {}", s.upcoming_deadlines());
    for u in &s.upcoming {
        println!("  {} {} [{}] - {}", u.task.due_date, u.task.title, u.task.status.as_str(), u.project_title);
    }
}

pub fn print_agenda(days: &[AgendaDay]) {
    if days.is_empty() {
        println!("Nothing due this month.");
        return;
    }
    for d in days {
        println!("{}", d.date.format("%a %Y-%m-%d"));
        for e in &d.entries {
            println!(
                "  [{}] {} ({}) {} - {}",
                e.task.status.as_str(),
                e.task.title,
                short_id(&e.task.id),
                e.task.priority.as_str(),
                e.project_title
            );
        }
    }
}
