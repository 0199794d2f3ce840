use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CommitDay, Profile};
use crate::taxonomy::language_color;

/// What the CLI renders: a profile and, optionally, its commit timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub profile: Profile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_timeline: Option<Vec<CommitDay>>,
}

pub fn format_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// `512 KB`, or megabytes with one decimal from 1024 KB up.
pub fn format_size(size_kb: u64) -> String {
    if size_kb < 1024 {
        format!("{} KB", size_kb)
    } else {
        format!("{:.1} MB", size_kb as f64 / 1024.0)
    }
}

pub fn format_relative(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(date) = date else {
        return "unknown".to_string();
    };

    let days = (now - date).num_days();
    if days < 1 {
        return "today".to_string();
    }
    if days == 1 {
        return "yesterday".to_string();
    }
    if days < 30 {
        return format!("{} days ago", days);
    }

    let months = days / 30;
    if months < 12 {
        return format!("{} {} ago", months, if months == 1 { "month" } else { "months" });
    }

    let years = months / 12;
    format!("{} {} ago", years, if years == 1 { "year" } else { "years" })
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

pub fn format_text(report: &Report, now: DateTime<Utc>) -> String {
    let profile = &report.profile;
    let mut output = String::new();

    output.push_str(&format!("\n=== GitHub Profile: {} ===\n\n", profile.username));
    output.push_str(&format!("Name: {}\n", profile.name));
    if !profile.bio.is_empty() {
        output.push_str(&format!("Bio: {}\n", profile.bio));
    }
    if !profile.location.is_empty() {
        output.push_str(&format!("Location: {}\n", profile.location));
    }
    if !profile.company.is_empty() {
        output.push_str(&format!("Company: {}\n", profile.company));
    }
    if !profile.blog.is_empty() {
        output.push_str(&format!("Blog: {}\n", profile.blog));
    }

    output.push_str(&format!(
        "Experience Level: {} ({} years on GitHub)\n",
        profile.experience_level, profile.account_age_years
    ));
    output.push_str(&format!(
        "Followers: {}  Following: {}  Public repos: {}  Gists: {}\n",
        profile.followers, profile.following, profile.public_repos, profile.public_gists
    ));

    output.push_str("\nStatistics:\n");
    output.push_str(&format!("  Stars: {}\n", profile.total_stars));
    output.push_str(&format!("  Forks: {}\n", profile.total_forks));
    output.push_str(&format!("  Watchers: {}\n", profile.total_watchers));
    output.push_str(&format!("  Open issues: {}\n", profile.total_open_issues));
    output.push_str(&format!("  Total size: {}\n", format_size(profile.total_size_kb)));
    output.push_str(&format!("  Pull requests: {}\n", profile.total_pull_requests));
    output.push_str(&format!("  Issues: {}\n", profile.total_issues_contributed));
    output.push_str(&format!("  Reviews: {}\n", profile.total_reviews));
    output.push_str(&format!("  Watched: {}\n", profile.total_watched));
    if let Some(starred) = profile.total_starred {
        output.push_str(&format!("  Starred: {}\n", starred));
    }
    output.push_str(&format!(
        "  Collaborative projects: {}\n",
        if profile.has_collaborative_projects { "yes" } else { "no" }
    ));

    if !profile.languages.is_empty() {
        output.push_str("\nLanguages:\n");
        for stat in &profile.languages {
            output.push_str(&format!(
                "  - {}: {} repos ({:.2}%)\n",
                stat.language, stat.count, stat.percentage
            ));
        }
    }

    if !profile.frameworks.is_empty() {
        output.push_str(&format!("\nFrameworks: {}\n", profile.frameworks.join(", ")));
    }

    if !profile.top_repos.is_empty() {
        output.push_str("\nTop Repositories:\n");
        for repo in &profile.top_repos {
            output.push_str(&format!(
                "  - {} ({} stars, {} forks, {}): {}\n",
                repo.name, repo.stars, repo.forks, repo.language, repo.description
            ));
        }
    }

    if !profile.repositories.is_empty() {
        output.push_str("\nRepositories:\n");
        for repo in &profile.repositories {
            output.push_str(&format!(
                "  - {} [{}] {} stars, updated {}, {}\n",
                repo.name,
                repo.language,
                repo.stars,
                format_relative(repo.updated_at, now),
                format_size(repo.size)
            ));
        }
    }

    if !profile.recent_activity.is_empty() {
        output.push_str("\nRecent Activity:\n");
        for event in &profile.recent_activity {
            output.push_str(&format!(
                "  - {} ({})\n",
                event.describe(),
                format_relative(Some(event.date()), now)
            ));
        }
    }

    if let Some(timeline) = &report.commit_timeline {
        output.push_str("\nCommits (last 30 days):\n");
        for day in timeline {
            output.push_str(&format!(
                "  {:>6} {} {}\n",
                day.date,
                "#".repeat(day.count.min(50) as usize),
                day.count
            ));
        }
    }

    output
}

pub fn format_markdown(report: &Report, now: DateTime<Utc>) -> String {
    let profile = &report.profile;
    let mut output = String::new();

    output.push_str(&format!("# GitHub Profile: {}\n\n", profile.username));
    output.push_str(&format!("**Name:** {}\n\n", profile.name));
    if !profile.bio.is_empty() {
        output.push_str(&format!("> {}\n\n", profile.bio));
    }

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Experience Level | {} |\n", profile.experience_level));
    output.push_str(&format!("| Account Age | {} years |\n", profile.account_age_years));
    output.push_str(&format!("| Location | {} |\n", or_dash(&profile.location)));
    output.push_str(&format!("| Company | {} |\n", or_dash(&profile.company)));
    output.push_str(&format!("| Followers | {} |\n", profile.followers));
    output.push_str(&format!("| Following | {} |\n", profile.following));
    output.push_str(&format!("| Public Repos | {} |\n", profile.public_repos));
    output.push_str(&format!("| Stars | {} |\n", profile.total_stars));
    output.push_str(&format!("| Forks | {} |\n", profile.total_forks));
    output.push_str(&format!("| Total Size | {} |\n", format_size(profile.total_size_kb)));
    output.push_str(&format!("| Pull Requests | {} |\n", profile.total_pull_requests));
    output.push_str(&format!("| Issues | {} |\n", profile.total_issues_contributed));
    output.push_str(&format!("| Reviews | {} |\n", profile.total_reviews));

    if !profile.languages.is_empty() {
        output.push_str("\n## Languages\n\n");
        output.push_str("| Language | Repos | Share | Color |\n");
        output.push_str("|----------|-------|-------|-------|\n");
        for stat in &profile.languages {
            output.push_str(&format!(
                "| {} | {} | {:.2}% | `{}` |\n",
                stat.language,
                stat.count,
                stat.percentage,
                language_color(&stat.language)
            ));
        }
    }

    if !profile.frameworks.is_empty() {
        output.push_str("\n## Frameworks\n\n");
        for framework in &profile.frameworks {
            output.push_str(&format!("- {}\n", framework));
        }
    }

    if !profile.repositories.is_empty() {
        output.push_str("\n## Repositories\n\n");
        output.push_str("| Name | Language | Stars | Forks | Updated | Size |\n");
        output.push_str("|------|----------|-------|-------|---------|------|\n");
        for repo in &profile.repositories {
            output.push_str(&format!(
                "| [{}]({}) | {} | {} | {} | {} | {} |\n",
                repo.name,
                repo.url,
                repo.language,
                repo.stars,
                repo.forks,
                format_relative(repo.updated_at, now),
                format_size(repo.size)
            ));
        }
    }

    if !profile.recent_activity.is_empty() {
        output.push_str("\n## Recent Activity\n\n");
        for event in &profile.recent_activity {
            output.push_str(&format!(
                "- {} *({})*\n",
                event.describe(),
                format_relative(Some(event.date()), now)
            ));
        }
    }

    if let Some(timeline) = &report.commit_timeline {
        output.push_str("\n## Commits (last 30 days)\n\n");
        output.push_str("| Day | Commits |\n|-----|---------|\n");
        for day in timeline {
            output.push_str(&format!("| {} | {} |\n", day.date, day.count));
        }
    }

    output.push_str(&format!(
        "\n---\n*Generated on {}*\n",
        now.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
