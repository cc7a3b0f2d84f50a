//! In-memory search, filter and sort helpers over fetched records

use crate::models::{EmployerProfile, Job, UserProfile};

/// How a skill search combines the requested skills
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkillMatch {
    /// Profile has at least one of the skills
    #[default]
    Any,
    /// Profile has every skill
    All,
}

/// Jobs whose title or description contains `query`, case-insensitively.
/// Whitespace in `query` is significant; only the empty query matches everything.
pub fn search_jobs(jobs: &[Job], query: &str) -> Vec<Job> {
    let needle = query.to_lowercase();
    jobs.iter()
        .filter(|j| {
            j.title.to_lowercase().contains(&needle)
                || j.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Profiles listing the requested skills (case-insensitive equality).
/// An empty skill list matches nothing.
pub fn search_user_profiles_by_skills(
    profiles: &[UserProfile],
    skills: &[String],
    mode: SkillMatch,
) -> Vec<UserProfile> {
    let wanted: Vec<String> = skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if wanted.is_empty() {
        return Vec::new();
    }

    profiles
        .iter()
        .filter(|p| {
            let has = |skill: &String| p.skills.iter().any(|s| s.trim().to_lowercase() == *skill);
            match mode {
                SkillMatch::Any => wanted.iter().any(has),
                SkillMatch::All => wanted.iter().all(has),
            }
        })
        .cloned()
        .collect()
}

/// Employers whose industry contains `industry`, case-insensitively
pub fn filter_employers_by_industry(
    profiles: &[EmployerProfile],
    industry: &str,
) -> Vec<EmployerProfile> {
    let needle = industry.trim().to_lowercase();
    profiles
        .iter()
        .filter(|p| p.industry.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable sort by application count
pub fn sort_jobs_by_application_count(jobs: &[Job], ascending: bool) -> Vec<Job> {
    let mut out = jobs.to_vec();
    if ascending {
        out.sort_by(|a, b| a.application_count.cmp(&b.application_count));
    } else {
        out.sort_by(|a, b| b.application_count.cmp(&a.application_count));
    }
    out
}

/// Stable sort by deadline
pub fn sort_jobs_by_deadline(jobs: &[Job], ascending: bool) -> Vec<Job> {
    let mut out = jobs.to_vec();
    if ascending {
        out.sort_by(|a, b| a.deadline.cmp(&b.deadline));
    } else {
        out.sort_by(|a, b| b.deadline.cmp(&a.deadline));
    }
    out
}

/// Jobs with a salary inside `[min, max]`. Without bounds every job is kept;
/// with any bound, jobs without a salary are dropped.
pub fn filter_jobs_by_salary_range(jobs: &[Job], min: Option<u64>, max: Option<u64>) -> Vec<Job> {
    if min.is_none() && max.is_none() {
        return jobs.to_vec();
    }
    jobs.iter()
        .filter(|j| match j.salary {
            Some(s) => min.map_or(true, |m| s >= m) && max.map_or(true, |m| s <= m),
            None => false,
        })
        .cloned()
        .collect()
}
