use std::sync::OnceLock;

use libsnitch_core::config::Credentials;
use libsnitch_core::tracker::{IssueState, IssueTracker};
use libsnitch_core::SnitchError;
use regex::Regex;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{GithubError, DEFAULT_API_URL};

#[derive(Serialize)]
struct NewIssue<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Deserialize)]
struct CreatedIssue {
    number: u64,
}

#[derive(Deserialize)]
struct IssueStatus {
    state: String,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Check that `repo` is a plain `<owner>/<repo>` pair
pub fn validate_repo(repo: &str) -> Result<(), GithubError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").expect("repo pattern"));
    if re.is_match(repo) && !repo.split('/').any(|part| part == "." || part == "..") {
        Ok(())
    } else {
        Err(GithubError::InvalidRepo(repo.to_string()))
    }
}

/// Issue number behind a marker id such as `#42`
pub fn issue_number(id: &str) -> Result<u64, GithubError> {
    id.strip_prefix('#')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| GithubError::InvalidIssueId(id.to_string()))
}

/// Issue tracker backed by the issues of one GitHub repository
pub struct GithubTracker {
    client: Client,
    api_url: String,
    repo: String,
}

impl GithubTracker {
    pub fn new(creds: &Credentials, repo: &str) -> Result<Self, GithubError> {
        validate_repo(repo)?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {}", creds.personal_token.trim()))
            .map_err(|_| GithubError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Client::builder()
            .user_agent(concat!("snitch/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(creds.timeout())
            .build()?;

        let api_url = creds
            .api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            api_url,
            repo: repo.to_string(),
        })
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    fn issues_url(&self) -> String {
        format!("{}/repos/{}/issues", self.api_url, self.repo)
    }

    /// Open an issue and return its number
    pub fn open_issue(&self, title: &str, body: &str) -> Result<u64, GithubError> {
        debug!(repo = %self.repo, %title, "POST issue");
        let response = self
            .client
            .post(self.issues_url())
            .json(&NewIssue { title, body })
            .send()?;
        let created: CreatedIssue = check_status(response)?.json()?;
        Ok(created.number)
    }

    /// Fetch the `state` field of issue `number`
    pub fn fetch_state(&self, number: u64) -> Result<String, GithubError> {
        debug!(repo = %self.repo, number, "GET issue");
        let response = self
            .client
            .get(format!("{}/{}", self.issues_url(), number))
            .send()?;
        let issue: IssueStatus = check_status(response)?.json()?;
        Ok(issue.state)
    }
}

fn check_status(response: Response) -> Result<Response, GithubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&text)
        .map(|e| e.message)
        .unwrap_or(text);
    Err(GithubError::Status {
        status: status.as_u16(),
        message,
    })
}

impl IssueTracker for GithubTracker {
    fn create_issue(&self, title: &str, body: &str) -> Result<String, SnitchError> {
        let number = self.open_issue(title, body)?;
        Ok(format!("#{}", number))
    }

    fn issue_state(&self, id: &str) -> Result<IssueState, SnitchError> {
        let number = issue_number(id)?;
        let state = self.fetch_state(number)?;
        Ok(IssueState::parse(&state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answer exactly one HTTP request with a canned response; the join
    /// handle yields the raw request text.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 {
                    break;
                }
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                request.push_str(&line);
                if line == "\r\n" {
                    break;
                }
            }
            let mut payload = vec![0u8; content_length];
            reader.read_exact(&mut payload).unwrap();
            request.push_str(&String::from_utf8(payload).unwrap());

            write!(
                stream,
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            )
            .unwrap();
            request
        });
        (format!("http://{}", addr), handle)
    }

    fn creds(api_url: &str) -> Credentials {
        Credentials {
            personal_token: "ghp_test".to_string(),
            api_url: Some(api_url.to_string()),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn test_validate_repo() {
        assert!(validate_repo("tsoding/snitch").is_ok());
        assert!(validate_repo("a-b.c/d_e").is_ok());
        assert!(validate_repo("snitch").is_err());
        assert!(validate_repo("a/b/c").is_err());
        assert!(validate_repo("../issues").is_err());
        assert!(validate_repo("owner/repo?x=1").is_err());
    }

    #[test]
    fn test_issue_number() {
        assert_eq!(issue_number("#42").unwrap(), 42);
        assert!(issue_number("42").is_err());
        assert!(issue_number("#").is_err());
        assert!(issue_number("#4/../1").is_err());
        assert!(issue_number("#+1").is_err());
    }

    #[test]
    fn test_create_issue() {
        let (url, server) = serve_once("HTTP/1.1 201 Created", r#"{"number": 100, "state": "open"}"#);
        let tracker = GithubTracker::new(&creds(&url), "owner/repo").unwrap();

        let id = tracker.create_issue("add tests", "src/lib.rs:5").unwrap();
        assert_eq!(id, "#100");

        let request = server.join().unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /repos/owner/repo/issues HTTP/1.1"));
        assert!(lower.contains("authorization: token ghp_test"));
        assert!(lower.contains("accept: application/vnd.github+json"));
        assert!(lower.contains("user-agent: snitch/"));
        assert!(request.contains(r#"{"title":"add tests","body":"src/lib.rs:5"}"#));
    }

    #[test]
    fn test_issue_state() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", r#"{"number": 7, "state": "closed"}"#);
        let tracker = GithubTracker::new(&creds(&url), "owner/repo").unwrap();

        assert_eq!(tracker.issue_state("#7").unwrap(), IssueState::Closed);
        let request = server.join().unwrap();
        assert!(request.starts_with("GET /repos/owner/repo/issues/7 HTTP/1.1"));
    }

    #[test]
    fn test_error_status_carries_message() {
        let (url, server) = serve_once("HTTP/1.1 401 Unauthorized", r#"{"message": "Bad credentials"}"#);
        let tracker = GithubTracker::new(&creds(&url), "owner/repo").unwrap();

        let err = tracker.open_issue("t", "b").unwrap_err();
        server.join().unwrap();
        match err {
            GithubError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Bad credentials");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_id_never_hits_network() {
        let tracker = GithubTracker::new(&creds("http://127.0.0.1:9"), "owner/repo").unwrap();
        let err = tracker.issue_state("#1/../../x").unwrap_err();
        assert!(matches!(err, SnitchError::InvalidArgs(_)));
    }
}
