use anyhow::Result;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::debug;

use crate::client::JobsApi;
use crate::models::{Analytics, Job};

// The dashboard thread never touches the network. A single worker thread owns
// the API client and serves requests in order; every request carries the
// generation it was issued at, and a reply is applied only while its
// generation is still current. A superseded reply is dropped, so the view
// always reflects the latest requested identifier.

enum Request {
    Jobs { generation: u64, company_id: i64 },
    Analytics { generation: u64, job_id: i64 },
}

enum Reply {
    Jobs {
        generation: u64,
        result: Result<Vec<Job>>,
    },
    Analytics {
        generation: u64,
        result: Result<Analytics>,
    },
}

pub enum FetchEvent {
    Jobs(Result<Vec<Job>>),
    Analytics(Result<Analytics>),
}

pub struct Fetcher {
    tx: Sender<Request>,
    rx: Receiver<Reply>,
    jobs_generation: u64,
    analytics_generation: u64,
}

impl Fetcher {
    pub fn spawn(api: impl JobsApi) -> Self {
        let (req_tx, req_rx) = mpsc::channel::<Request>();
        let (reply_tx, reply_rx) = mpsc::channel::<Reply>();

        thread::spawn(move || {
            for request in req_rx {
                let reply = match request {
                    Request::Jobs {
                        generation,
                        company_id,
                    } => Reply::Jobs {
                        generation,
                        result: api.fetch_jobs(company_id),
                    },
                    Request::Analytics { generation, job_id } => Reply::Analytics {
                        generation,
                        result: api.fetch_analytics(job_id),
                    },
                };
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
        });

        Self {
            tx: req_tx,
            rx: reply_rx,
            jobs_generation: 0,
            analytics_generation: 0,
        }
    }

    pub fn request_jobs(&mut self, company_id: i64) {
        self.jobs_generation += 1;
        let _ = self.tx.send(Request::Jobs {
            generation: self.jobs_generation,
            company_id,
        });
    }

    pub fn request_analytics(&mut self, job_id: i64) {
        self.analytics_generation += 1;
        let _ = self.tx.send(Request::Analytics {
            generation: self.analytics_generation,
            job_id,
        });
    }

    // Invalidates any in-flight analytics request; used when the modal closes
    // so a late reply cannot resurrect a discarded view.
    pub fn cancel_analytics(&mut self) {
        self.analytics_generation += 1;
    }

    /// Next pending reply whose generation is still current, if any.
    pub fn poll(&mut self) -> Option<FetchEvent> {
        while let Ok(reply) = self.rx.try_recv() {
            match reply {
                Reply::Jobs { generation, result } => {
                    if generation == self.jobs_generation {
                        return Some(FetchEvent::Jobs(result));
                    }
                    debug!(generation, current = self.jobs_generation, "dropping stale job list reply");
                }
                Reply::Analytics { generation, result } => {
                    if generation == self.analytics_generation {
                        return Some(FetchEvent::Analytics(result));
                    }
                    debug!(generation, current = self.analytics_generation, "dropping stale analytics reply");
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::time::{Duration, Instant};

    struct StubApi;

    impl JobsApi for StubApi {
        fn fetch_jobs(&self, company_id: i64) -> Result<Vec<Job>> {
            // Echo the company id back as the job id so the test can tell
            // which request a reply belongs to.
            Ok(vec![Job {
                job_id: company_id,
                job_title: "Stub".to_string(),
                comp_name: None,
                company_logo: None,
                created_date: "2024-01-01".to_string(),
                total_applications: None,
                total_submissions: None,
                completed_submissions: None,
            }])
        }

        fn fetch_analytics(&self, job_id: i64) -> Result<Analytics> {
            Err(anyhow!("no analytics for job {job_id}"))
        }
    }

    fn poll_until(fetcher: &mut Fetcher, timeout: Duration) -> Option<FetchEvent> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(event) = fetcher.poll() {
                return Some(event);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_latest_jobs_request_wins() {
        let mut fetcher = Fetcher::spawn(StubApi);
        fetcher.request_jobs(1);
        fetcher.request_jobs(2);

        match poll_until(&mut fetcher, Duration::from_secs(2)) {
            Some(FetchEvent::Jobs(Ok(jobs))) => assert_eq!(jobs[0].job_id, 2),
            other => panic!("expected jobs reply, got {:?}", other.is_some()),
        }
    }

    #[test]
    fn test_cancelled_analytics_reply_dropped() {
        let mut fetcher = Fetcher::spawn(StubApi);
        fetcher.request_analytics(7);
        fetcher.cancel_analytics();

        // The worker still answers, but the reply is stale and must be
        // swallowed rather than surfaced.
        thread::sleep(Duration::from_millis(100));
        assert!(fetcher.poll().is_none());
    }

    #[test]
    fn test_failure_surfaces_as_value() {
        let mut fetcher = Fetcher::spawn(StubApi);
        fetcher.request_analytics(7);

        match poll_until(&mut fetcher, Duration::from_secs(2)) {
            Some(FetchEvent::Analytics(result)) => {
                assert!(result.is_err());
            }
            other => panic!("expected analytics reply, got {:?}", other.is_some()),
        }
    }
}
