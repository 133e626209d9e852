//! Integration tests for the stats command.
//!
//! A wiremock server stands in for the Debian mirror, so these tests run without
//! network access.

use contents_stats_lib::Host;
use contents_stats_lib::contents::Architecture;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::Write;
use std::net::TcpListener;
use std::path::Path;
use strum::IntoEnumIterator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE_PATH: &str = "/debian/dists/stable/main/";

/// Test host that captures output to in-memory buffers.
#[derive(Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

/// Index with `pkg<n>` owning `n` files for n in 1..=15.
fn sample_index() -> String {
    let mut text = String::new();
    for n in 1..=15 {
        for file in 0..n {
            text.push_str(&format!("usr/share/pkg{n}/file{file}    section/pkg{n}\n"));
        }
    }
    text
}

async fn start_mirror() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

async fn serve_contents(server: &MockServer, architecture: Architecture, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}Contents-{architecture}.gz")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

/// A loopback mirror URL on a port that was just released, so connecting to it is refused.
fn unreachable_mirror_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/debian/")
}

fn mirror_url(server: &MockServer) -> String {
    format!("{}{BASE_PATH}", server.uri())
}

async fn run_stats(host: &mut TestHost, architecture: &str, mirror: &str, work_dir: &Path, extra: &[&str]) -> contents_stats_lib::Result<()> {
    let work_dir = work_dir.to_str().unwrap();
    let mut args = vec![
        "contents-stats",
        architecture,
        "--mirror",
        mirror,
        "--work-dir",
        work_dir,
        "--color",
        "never",
    ];
    args.extend_from_slice(extra);
    contents_stats_lib::run(host, args).await
}

/// Counts parsed back out of the console report, in report order.
fn report_counts(output: &str) -> Vec<(String, u64)> {
    output
        .lines()
        .filter_map(|line| {
            let (_, rest) = line.trim_start().split_once(". ")?;
            let mut fields = rest.split_whitespace();
            let name = fields.next()?.to_string();
            let count = fields.next()?.parse().ok()?;
            Some((name, count))
        })
        .collect()
}

#[tokio::test]
async fn test_every_architecture_reports_top_ten() {
    let server = start_mirror().await;
    let temp_dir = tempfile::tempdir().unwrap();

    for architecture in Architecture::iter() {
        serve_contents(&server, architecture, gzip(&sample_index())).await;

        let mut host = TestHost::default();
        run_stats(&mut host, architecture.as_str(), &mirror_url(&server), temp_dir.path(), &[])
            .await
            .unwrap_or_else(|e| panic!("stats for {architecture} failed: {e:#}"));

        let counts = report_counts(&host.output_str());
        assert_eq!(counts.len(), 10, "unexpected report for {architecture}: {}", host.output_str());
        assert_eq!(counts[0], ("pkg15".to_string(), 15));
        assert_eq!(counts[9], ("pkg6".to_string(), 6));
        assert!(counts.windows(2).all(|pair| pair[0].1 >= pair[1].1));

        assert!(temp_dir.path().join(format!("Contents-{architecture}")).exists());
        assert!(!temp_dir.path().join(format!("Contents-{architecture}.gz")).exists());
        assert!(host.error_str().is_empty(), "unexpected warning: {}", host.error_str());
    }
}

#[tokio::test]
async fn test_scenario_report() {
    let server = start_mirror().await;
    serve_contents(&server, Architecture::Amd64, gzip("a/b/c    x/pkg1\nd/e    y/pkg1\nf    z/pkg2\n")).await;
    let temp_dir = tempfile::tempdir().unwrap();

    let mut host = TestHost::default();
    run_stats(&mut host, "amd64", &mirror_url(&server), temp_dir.path(), &[]).await.unwrap();

    let output = host.output_str();
    assert!(output.contains("Top 2 packages for the amd64 architecture"), "got: {output}");
    assert_eq!(report_counts(&output), vec![("pkg1".to_string(), 2), ("pkg2".to_string(), 1)]);
}

#[tokio::test]
async fn test_unreachable_mirror_uses_cache_and_is_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("Contents-arm64"), sample_index()).unwrap();
    let mirror = unreachable_mirror_url();

    let mut first = TestHost::default();
    run_stats(&mut first, "arm64", &mirror, temp_dir.path(), &[])
        .await
        .unwrap();

    let mut second = TestHost::default();
    run_stats(&mut second, "arm64", &mirror, temp_dir.path(), &[])
        .await
        .unwrap();

    assert!(first.error_str().contains("mirror server not available"), "got: {}", first.error_str());
    assert_eq!(first.output_str(), second.output_str());
    assert_eq!(report_counts(&first.output_str()).len(), 10);
}

#[tokio::test]
async fn test_missing_file_falls_back_to_cache() {
    let server = start_mirror().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}Contents-s390x.gz")))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("Contents-s390x"), "bin/ls    utils/coreutils\n").unwrap();

    let mut host = TestHost::default();
    run_stats(&mut host, "s390x", &mirror_url(&server), temp_dir.path(), &[]).await.unwrap();

    assert!(host.error_str().contains("requested file not available"), "got: {}", host.error_str());
    assert_eq!(report_counts(&host.output_str()), vec![("coreutils".to_string(), 1)]);
}

#[tokio::test]
async fn test_corrupt_download_keeps_cache() {
    let server = start_mirror().await;
    serve_contents(&server, Architecture::Ppc64el, b"not a gzip stream".to_vec()).await;

    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("Contents-ppc64el"), "bin/ls    utils/coreutils\n").unwrap();

    let mut host = TestHost::default();
    run_stats(&mut host, "ppc64el", &mirror_url(&server), temp_dir.path(), &[]).await.unwrap();

    assert!(host.error_str().contains("unable to decompress"), "got: {}", host.error_str());
    assert_eq!(report_counts(&host.output_str()), vec![("coreutils".to_string(), 1)]);
    assert!(!temp_dir.path().join("Contents-ppc64el.gz").exists());
}

#[tokio::test]
async fn test_no_cache_and_no_mirror_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut host = TestHost::default();
    let result = run_stats(&mut host, "amd64", &unreachable_mirror_url(), temp_dir.path(), &[]).await;

    assert!(result.is_err());
    assert!(!host.output_str().contains("Top "));
}

#[tokio::test]
async fn test_usage_errors_make_no_network_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let mirror = mirror_url(&server);

    let mut host = TestHost::default();
    assert!(contents_stats_lib::run(&mut host, ["contents-stats"]).await.is_err());
    assert_eq!(host.exit_code, Some(2));

    let mut host = TestHost::default();
    let result = contents_stats_lib::run(&mut host, ["contents-stats", "amd64", "i386", "--mirror", mirror.as_str()]).await;
    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(2));

    let mut host = TestHost::default();
    let result = contents_stats_lib::run(&mut host, ["contents-stats", "sparc", "--mirror", mirror.as_str()]).await;
    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(2));
    assert!(host.error_str().contains("not supported"), "got: {}", host.error_str());
}

#[tokio::test]
async fn test_json_report_file() {
    let server = start_mirror().await;
    serve_contents(&server, Architecture::Mipsel, gzip("a    x/pkg1\nb    x/pkg1\nc    y/pkg2\n")).await;

    let temp_dir = tempfile::tempdir().unwrap();
    let json_path = temp_dir.path().join("report.json");

    let mut host = TestHost::default();
    run_stats(
        &mut host,
        "mipsel",
        &mirror_url(&server),
        temp_dir.path(),
        &["--json", json_path.to_str().unwrap()],
    )
    .await
    .unwrap();

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(report["architecture"], "mipsel");
    assert_eq!(report["source"], "mirror");
    assert_eq!(report["packages"][0]["name"], "pkg1");
    assert_eq!(report["packages"][0]["count"], 2);
    assert_eq!(report["packages"][1]["rank"], 2);
}

#[tokio::test]
async fn test_config_file_sets_top_count() {
    let server = start_mirror().await;
    serve_contents(&server, Architecture::Armel, gzip(&sample_index())).await;

    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("contents-stats.toml"), "top_count = 3\n").unwrap();

    let mut host = TestHost::default();
    run_stats(&mut host, "armel", &mirror_url(&server), temp_dir.path(), &[]).await.unwrap();

    let names: Vec<_> = report_counts(&host.output_str()).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["pkg15", "pkg14", "pkg13"]);
}
