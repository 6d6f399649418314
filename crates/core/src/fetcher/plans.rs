//! Plan builders for the three acquisition strategies.

use std::path::PathBuf;

use crate::date::DumpDate;
use crate::status::Job;
use crate::{PAGEVIEWS_JOB, WIKIDATA_JOB};

use super::types::FetchPlan;

fn mirror_base(mirror_url: &str) -> &str {
    mirror_url.trim_end_matches('/')
}

/// Files listed for `job` in the status document.
///
/// Entry URLs are mirror-relative paths such as `/enwiki/20200920/x.gz`.
pub fn status_job_plan(job: &Job, mirror_url: &str, target_dir: impl Into<PathBuf>) -> FetchPlan {
    let base = mirror_base(mirror_url);
    let mut plan = FetchPlan::new(&job.name, target_dir);

    for entry in job.files.values() {
        let url = if entry.url.starts_with('/') {
            format!("{}{}", base, entry.url)
        } else {
            format!("{}/{}", base, entry.url)
        };
        plan.push(&entry.name, url);
    }

    plan
}

/// Daily user pageview files for the full month preceding `wp_date`.
pub fn pageview_plan(
    wp_date: &DumpDate,
    mirror_url: &str,
    target_dir: impl Into<PathBuf>,
) -> FetchPlan {
    let base = mirror_base(mirror_url);
    let month = wp_date.previous_month();
    let (year, mm) = (month.year, month.month);
    let mut plan = FetchPlan::new(PAGEVIEWS_JOB, target_dir);

    for day in 1..=month.days() {
        let file_name = format!("pageviews-{}{:02}{:02}-user.bz2", year, mm, day);
        let url = format!(
            "{}/other/pageview_complete/{}/{}-{:02}/{}",
            base, year, year, mm, file_name
        );
        plan.push(file_name, url);
    }

    plan
}

/// The single Wikidata JSON archive for `wd_date`.
pub fn wikidata_plan(
    wd_date: &DumpDate,
    mirror_url: &str,
    target_dir: impl Into<PathBuf>,
) -> FetchPlan {
    let base = mirror_base(mirror_url);
    let file_name = format!("wikidata-{}-all.json.bz2", wd_date);
    let url = format!("{}/wikidatawiki/entities/{}/{}", base, wd_date, file_name);

    let mut plan = FetchPlan::new(WIKIDATA_JOB, target_dir);
    plan.push(file_name, url);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    const MIRROR: &str = "https://dumps.wikimedia.org";

    #[test]
    fn test_status_job_plan() {
        let job = fixtures::job(
            "pagetable",
            "done",
            &["enwiki-20200920-page.sql.gz", "enwiki-20200920-page2.sql.gz"],
        );
        let plan = status_job_plan(&job, MIRROR, "/data/pagetable");

        assert_eq!(plan.job_name, "pagetable");
        assert_eq!(plan.target_dir, PathBuf::from("/data/pagetable"));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.items[0].file_name, "enwiki-20200920-page.sql.gz");
        assert_eq!(
            plan.items[0].url,
            "https://dumps.wikimedia.org/enwiki/20200920/enwiki-20200920-page.sql.gz"
        );
    }

    #[test]
    fn test_status_job_plan_relative_entry_url() {
        let mut job = fixtures::job("pagetable", "done", &["a.gz"]);
        if let Some(entry) = job.files.get_mut("a.gz") {
            entry.url = "enwiki/20200920/a.gz".to_string();
        }
        let plan = status_job_plan(&job, "https://mirror.test/", "/tmp");
        assert_eq!(plan.items[0].url, "https://mirror.test/enwiki/20200920/a.gz");
    }

    #[test]
    fn test_status_job_without_files_is_empty() {
        let job = fixtures::job("articlesdump", "done", &[]);
        assert!(status_job_plan(&job, MIRROR, "/tmp").is_empty());
    }

    #[test]
    fn test_pageview_plan_previous_month() {
        let wp_date: DumpDate = "20200920".parse().unwrap();
        let plan = pageview_plan(&wp_date, MIRROR, "/data/pageviewcomplete");

        assert_eq!(plan.job_name, "pageviewcomplete");
        assert_eq!(plan.len(), 31);
        assert_eq!(plan.items[0].file_name, "pageviews-20200801-user.bz2");
        assert_eq!(plan.items[30].file_name, "pageviews-20200831-user.bz2");
        assert_eq!(
            plan.items[0].url,
            "https://dumps.wikimedia.org/other/pageview_complete/2020/2020-08/pageviews-20200801-user.bz2"
        );
        assert!(plan
            .items
            .iter()
            .all(|i| i.url.starts_with(
                "https://dumps.wikimedia.org/other/pageview_complete/2020/2020-08/"
            )));
    }

    #[test]
    fn test_pageview_plan_year_rollover() {
        let wp_date: DumpDate = "20200115".parse().unwrap();
        let plan = pageview_plan(&wp_date, MIRROR, "/tmp");

        assert_eq!(plan.len(), 31);
        assert_eq!(plan.items[0].file_name, "pageviews-20191201-user.bz2");
        assert_eq!(plan.items[30].file_name, "pageviews-20191231-user.bz2");
        assert!(plan.items[0]
            .url
            .contains("/other/pageview_complete/2019/2019-12/"));
    }

    #[test]
    fn test_pageview_plan_leap_february() {
        let wp_date: DumpDate = "20200301".parse().unwrap();
        let plan = pageview_plan(&wp_date, MIRROR, "/tmp");
        assert_eq!(plan.len(), 29);
        assert_eq!(plan.items[28].file_name, "pageviews-20200229-user.bz2");

        let wp_date: DumpDate = "20210320".parse().unwrap();
        assert_eq!(pageview_plan(&wp_date, MIRROR, "/tmp").len(), 28);
    }

    #[test]
    fn test_pageview_plan_thirty_day_month() {
        let wp_date: DumpDate = "20201001".parse().unwrap();
        let plan = pageview_plan(&wp_date, MIRROR, "/tmp");
        assert_eq!(plan.len(), 30);
        assert_eq!(plan.items[29].file_name, "pageviews-20200930-user.bz2");
    }

    #[test]
    fn test_wikidata_plan() {
        let wd_date: DumpDate = "20200921".parse().unwrap();
        let plan = wikidata_plan(&wd_date, MIRROR, "/data/wikidata-raw-20200921");

        assert_eq!(plan.job_name, "wikidata");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.items[0].file_name, "wikidata-20200921-all.json.bz2");
        assert_eq!(
            plan.items[0].url,
            "https://dumps.wikimedia.org/wikidatawiki/entities/20200921/wikidata-20200921-all.json.bz2"
        );
    }
}
