#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use sports_ics::error::FeedError;
use sports_ics::espn::ScheduleSource;
use sports_ics::league::League;
use sports_ics::model::game::{GameRecord, ScheduleDocument};
use sports_ics::model::team::{Team, TeamsDocument};

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/{}", name)).unwrap_or_else(|e| panic!("failed to read {}: {}", name, e))
}

pub fn fixture_teams() -> Vec<Team> {
    let doc: TeamsDocument = serde_json::from_str(&load_fixture("nfl_teams.json")).expect("teams fixture");
    doc.into_teams().expect("teams list")
}

pub fn fixture_schedule(name: &str) -> Vec<GameRecord> {
    let doc: ScheduleDocument = serde_json::from_str(&load_fixture(name)).expect("schedule fixture");
    doc.into_records().map(|r| r.expect("schedule record")).collect()
}

/// In-memory source that counts calls and can be flipped into failure.
#[derive(Default)]
pub struct FakeSource {
    pub teams: Vec<Team>,
    pub schedules: Mutex<HashMap<String, Vec<GameRecord>>>,
    pub failing_teams: Vec<String>,
    pub fail_listing: AtomicBool,
    pub team_calls: AtomicUsize,
    pub schedule_calls: AtomicUsize,
}

impl FakeSource {
    /// Chiefs and Bills from the fixtures.
    pub fn nfl_fixture() -> Self {
        let mut schedules = HashMap::new();
        schedules.insert("12".to_string(), fixture_schedule("chiefs_schedule.json"));
        schedules.insert("2".to_string(), fixture_schedule("bills_schedule.json"));
        Self {
            teams: fixture_teams(),
            schedules: Mutex::new(schedules),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_listing.store(failing, Ordering::SeqCst);
    }

    pub fn set_schedule(&self, team_id: &str, games: Vec<GameRecord>) {
        self.schedules.lock().unwrap().insert(team_id.to_string(), games);
    }

    pub fn total_calls(&self) -> usize {
        self.team_calls.load(Ordering::SeqCst) + self.schedule_calls.load(Ordering::SeqCst)
    }
}

impl ScheduleSource for FakeSource {
    fn teams(&self, league: League) -> Result<Vec<Team>, FeedError> {
        self.team_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(FeedError::Timeout { url: format!("fake://{}/teams", league.code()) });
        }
        Ok(self.teams.clone())
    }

    fn schedule(&self, league: League, team_id: &str) -> Result<Vec<GameRecord>, FeedError> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        let url = format!("fake://{}/teams/{}/schedule", league.code(), team_id);
        if self.failing_teams.iter().any(|t| t == team_id) {
            return Err(FeedError::Upstream { url, reason: "status 503".to_string() });
        }
        Ok(self.schedules.lock().unwrap().get(team_id).cloned().unwrap_or_default())
    }
}

pub fn uids(ics: &str) -> Vec<String> {
    ics.lines()
        .filter_map(|l| l.strip_prefix("UID:"))
        .map(|s| s.trim().to_string())
        .collect()
}

/// A game with the given id, date and competitors; `None` leaves that side out.
pub fn game(id: &str, date: &str, home: Option<&str>, away: Option<&str>) -> GameRecord {
    let mut competitors = Vec::new();
    for (role, name) in [("home", home), ("away", away)] {
        if let Some(name) = name {
            competitors.push(serde_json::json!({ "homeAway": role, "team": { "displayName": name } }));
        }
    }
    serde_json::from_value(serde_json::json!({
        "id": id,
        "date": date,
        "competitions": [ { "competitors": competitors } ]
    }))
    .expect("game record")
}

/// Raw HTTP/1.1 response with a body and `Connection: close`.
pub fn http_response(status: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    )
}

/// Answer every connection on an ephemeral port with `response`.
/// With `None` the request is read and the connection held open without a reply.
/// Returns the base URL.
pub fn spawn_upstream(response: Option<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub upstream");
    let addr = listener.local_addr().expect("stub address");
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            read_request_head(&mut stream);
            match &response {
                Some(r) => {
                    let _ = stream.write_all(r.as_bytes());
                }
                None => thread::sleep(Duration::from_secs(5)),
            }
        }
    });
    format!("http://{}", addr)
}

fn read_request_head(stream: &mut TcpStream) {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                head.extend_from_slice(&chunk[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
}
