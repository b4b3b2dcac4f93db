//! Fallback markup, used when the request is vetoed or the exchange fails.
//!
//! Each job becomes an empty mount point plus its data in an inert JSON
//! script block, both tagged with the job name and a fresh id, so the page
//! can still render the component client-side:
//!
//! ```text
//! <div data-hypernova-key="<name>" data-hypernova-id="<uuid>"></div>
//! <script type="application/json" data-hypernova-key="<name>" data-hypernova-id="<uuid>"><!--<json>--></script>
//! ```

use uuid::Uuid;

use crate::types::{Data, Job, JobResult, JobResults, Jobs};

/// `meta` key under which the fallback id is recorded.
pub const UUID_META_KEY: &str = "uuid";

/// Markup for one job. Serialization failure yields an empty data block.
pub fn fallback_html(name: &str, data: &Data, id: &Uuid) -> String {
    let content = escape_json_for_html(&serde_json::to_string(data).unwrap_or_default());
    format!(
        "<div data-hypernova-key=\"{name}\" data-hypernova-id=\"{id}\"></div>\n\
         <script type=\"application/json\" data-hypernova-key=\"{name}\" data-hypernova-id=\"{id}\"><!--{content}--></script>"
    )
}

/// Escape `<`, `>` and `&` as JSON unicode escapes so the data cannot close
/// the comment or the script element. The JSON value is unchanged.
fn escape_json_for_html(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Fallback result for `job` using the given id.
pub fn fallback_result_with_id(job: &Job, id: Uuid) -> JobResult {
    let mut result = JobResult::new(job.clone());
    result.html = fallback_html(&job.name, &job.data, &id);
    result.meta.insert(UUID_META_KEY.to_string(), id.to_string());
    result
}

/// Fallback result for `job` with a freshly generated id.
pub fn fallback_result(job: &Job) -> JobResult {
    fallback_result_with_id(job, Uuid::new_v4())
}

/// One fallback result per job, keyed like `jobs`.
pub fn fallback_results(jobs: &Jobs) -> JobResults {
    jobs.iter()
        .map(|(name, job)| (name.clone(), fallback_result(job)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const ID: &str = "0b8f3a4e-2c1d-4e5f-9a6b-7c8d9e0f1a2b";

    #[test]
    fn markup_has_exact_shape() {
        let job = Job::new("Nav").insert_data("user", "ada");
        let id = Uuid::parse_str(ID).expect("uuid");
        assert_eq!(
            fallback_html(&job.name, &job.data, &id),
            format!(
                "<div data-hypernova-key=\"Nav\" data-hypernova-id=\"{ID}\"></div>\n\
                 <script type=\"application/json\" data-hypernova-key=\"Nav\" data-hypernova-id=\"{ID}\"><!--{{\"user\":\"ada\"}}--></script>"
            )
        );
    }

    #[test]
    fn data_cannot_break_out_of_the_script_block() {
        let job = Job::new("Nav").insert_data("bio", "</script><img src=x onerror=alert(1)>--> & more");
        let id = Uuid::parse_str(ID).expect("uuid");
        let html = fallback_html(&job.name, &job.data, &id);

        assert_eq!(html.matches("</script>").count(), 1);
        assert_eq!(html.matches("-->").count(), 1);
        assert!(html.ends_with("--></script>"));
        assert!(!html.contains("<img"));

        let start = html.find("<!--").expect("comment start") + "<!--".len();
        let end = html.rfind("-->").expect("comment end");
        let embedded: Data = serde_json::from_str(&html[start..end]).expect("embedded json");
        assert_eq!(embedded, job.data);
    }

    #[test]
    fn result_records_id_and_original_job() {
        let job = Job::new("Nav");
        let id = Uuid::parse_str(ID).expect("uuid");
        let result = fallback_result_with_id(&job, id);
        assert_eq!(result.meta[UUID_META_KEY], ID);
        assert_eq!(result.original_job, job);
        assert!(!result.success);
        assert!(result.error.is_none());
        assert!(result.html.contains("<!--{}-->"));
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "count": 3 }))]
    #[case(json!({ "nested": { "list": [1, 2, 3] }, "flag": true }))]
    fn ids_differ_but_shape_is_stable(#[case] data: serde_json::Value) {
        let data = data.as_object().cloned().expect("object");
        let job = Job::new("Card").with_data(data);
        let a = fallback_result(&job);
        let b = fallback_result(&job);

        let id_a = &a.meta[UUID_META_KEY];
        let id_b = &b.meta[UUID_META_KEY];
        assert_ne!(id_a, id_b);
        assert_eq!(a.html.replace(id_a.as_str(), "ID"), b.html.replace(id_b.as_str(), "ID"));
    }

    #[test]
    fn one_result_per_job() {
        let jobs: Jobs = ["a", "b", "c"]
            .into_iter()
            .map(|n| (n.to_string(), Job::new(n)))
            .collect();
        let results = fallback_results(&jobs);
        assert_eq!(results.len(), 3);
        for (name, result) in &results {
            assert_eq!(&result.original_job.name, name);
            assert!(result.meta.contains_key(UUID_META_KEY));
        }
    }
}
