//! Built-in sample data used when nothing has been stored yet.

use chrono::NaiveDate;

use crate::models::{Document, Kpi, Project, Task, TaskPriority, TaskStatus};
use crate::ops::task_ops::with_tasks;

const AVATAR_ALICE: &str =
    "https://images.unsplash.com/photo-1494790108377-be9c29b29330?auto=format&fit=crop&q=80&w=150";
const AVATAR_CHARLIE: &str =
    "https://images.unsplash.com/photo-1599566150163-29194dcaad36?auto=format&fit=crop&q=80&w=150";
const AVATAR_SARAH: &str =
    "https://images.unsplash.com/photo-1580489944761-15a19d654956?auto=format&fit=crop&q=80&w=150";

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: &str,
    title: &str,
    assignee: &str,
    avatar: Option<&str>,
    status: TaskStatus,
    priority: TaskPriority,
    due: NaiveDate,
    created: NaiveDate,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        assignee: assignee.to_string(),
        assignee_avatar: avatar.map(str::to_string),
        due_date: due,
        created_at: Some(created.format("%Y-%m-%d").to_string()),
        status,
        priority,
    }
}

fn project(
    id: &str,
    title: &str,
    description: &str,
    (start, end): (NaiveDate, NaiveDate),
    tasks: Vec<Task>,
    documents: Vec<Document>,
    kpi: Kpi,
) -> Project {
    let shell = Project {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        start_date: start,
        end_date: end,
        tasks: Vec::new(),
        documents,
        progress: 0,
        kpi,
    };
    with_tasks(&shell, tasks)
}

/// Three sample projects. Progress is derived from their tasks like any other.
pub fn seed_projects() -> Vec<Project> {
    use TaskPriority::*;
    use TaskStatus::*;

    vec![
        project(
            "1",
            "Clean Water Initiative",
            "Providing clean drinking water to 5 rural villages through well construction and filtration systems.",
            (day(2023, 10, 1), day(2024, 3, 1)),
            vec![
                task("t1", "Site Survey", "Alice M.", Some(AVATAR_ALICE), Done, High, day(2023, 10, 15), day(2023, 10, 1)),
                task("t2", "Procure Materials", "Bob D.", None, Done, High, day(2023, 11, 1), day(2023, 10, 5)),
                task("t3", "Community Training", "Charlie", Some(AVATAR_CHARLIE), InProgress, Medium, day(2024, 1, 15), day(2023, 12, 1)),
                task("t4", "Final Inspection", "Alice M.", Some(AVATAR_ALICE), Todo, High, day(2024, 2, 28), day(2024, 1, 10)),
            ],
            vec![Document {
                id: "d1".to_string(),
                name: "Site_Map_v2.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                upload_date: "2023-10-10".to_string(),
            }],
            Kpi { beneficiaries: 1200, volunteers: 15, budget: 50000.0 },
        ),
        project(
            "2",
            "Education for All",
            "After-school tutoring program for underprivileged children in the metro area.",
            (day(2024, 1, 10), day(2024, 12, 20)),
            vec![
                task("t5", "Recruit Tutors", "Sarah J.", Some(AVATAR_SARAH), Done, High, day(2024, 1, 30), day(2024, 1, 12)),
                task("t6", "Curriculum Design", "Mike T.", None, InProgress, Medium, day(2024, 2, 15), day(2024, 1, 15)),
            ],
            Vec::new(),
            Kpi { beneficiaries: 350, volunteers: 40, budget: 15000.0 },
        ),
        project(
            "3",
            "Urban Garden Project",
            "Creating sustainable food sources in urban centers using rooftop gardens.",
            (day(2024, 3, 1), day(2024, 9, 30)),
            vec![task("t7", "Location Scouting", "Dave", None, InProgress, Medium, day(2024, 3, 20), day(2024, 3, 2))],
            Vec::new(),
            Kpi { beneficiaries: 500, volunteers: 25, budget: 20000.0 },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_progress_is_derived() {
        let projects = seed_projects();
        let progress: Vec<u8> = projects.iter().map(|p| p.progress).collect();
        assert_eq!(progress, vec![50, 50, 0]);
    }
}
