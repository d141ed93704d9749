use std::io::Read;

use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    api::error::{Error, Result},
    backend::query::{self, QueryParams},
};

/// Sends GET and POST requests and applies the response policy shared by
/// every endpoint: the body of a `200` is returned, any other status yields
/// `None`.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    agent: ureq::Agent,
}

impl Dispatcher {
    pub fn new(agent: ureq::Agent) -> Self {
        Dispatcher { agent }
    }

    pub fn get(&self, url: &str, params: &QueryParams) -> Result<Option<Vec<u8>>> {
        let pairs = query::flatten(params);
        debug!(%url, params = pairs.len(), "GET");
        let request = pairs
            .iter()
            .fold(self.agent.get(url), |request, (key, value)| request.query(key, value));
        read_body(url, request.call())
    }

    pub fn post<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<Option<Vec<u8>>> {
        let body = serde_json::to_vec(body).map_err(Error::Serialize)?;
        debug!(%url, bytes = body.len(), "POST");
        let result = self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_bytes(&body);
        read_body(url, result)
    }
}

fn read_body(url: &str, result: Result<ureq::Response, ureq::Error>) -> Result<Option<Vec<u8>>> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            debug!(%url, status, %body, "non-200 response, no data returned");
            return Ok(None);
        }
        Err(err) => {
            return Err(Error::Transport {
                url: url.to_owned(),
                source: Box::new(err),
            })
        }
    };

    let status = response.status();
    let mut body = Vec::new();
    response.into_reader().read_to_end(&mut body)?;
    if status != 200 {
        let body = String::from_utf8_lossy(&body);
        debug!(%url, status, %body, "non-200 response, no data returned");
        return Ok(None);
    }
    trace!(%url, bytes = body.len(), "response body read");
    Ok(Some(body))
}
