#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_relay_application::ports::UpstreamForwarder;
use ferrous_relay_domain::{
    Answer, DnsMessage, DomainError, Header, Question, ResourceRecord, CLASS_IN, TYPE_A,
};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the mock upstream does for a question name.
#[derive(Clone)]
pub enum Scripted {
    /// Echo the sub-query back with one A answer.
    Answer(Ipv4Addr),
    /// Same as `Answer`, after sleeping.
    Delayed(Ipv4Addr, Duration),
    /// Reply with this message as-is, ID overwritten by the sub-query's.
    Reply(DnsMessage),
    /// Reply with the sub-query's answer but a different ID.
    WrongId(Ipv4Addr, u16),
    /// Reply with bytes that do not decode.
    Garbage,
    /// Fail the round trip.
    Fail,
    /// Never reply.
    Hang,
}

#[derive(Clone)]
pub struct MockForwarder {
    script: Arc<Mutex<HashMap<String, Scripted>>>,
    received: Arc<Mutex<Vec<DnsMessage>>>,
}

impl MockForwarder {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(HashMap::new())),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn on(self, name: &str, behaviour: Scripted) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(name.to_string(), behaviour);
        self
    }

    /// Every sub-query seen so far, decoded, in arrival order.
    pub fn received(&self) -> Vec<DnsMessage> {
        self.received.lock().unwrap().clone()
    }

    pub fn received_names(&self) -> Vec<String> {
        self.received()
            .iter()
            .map(|q| q.questions.first().map(Question::name).unwrap_or_default())
            .collect()
    }
}

impl Default for MockForwarder {
    fn default() -> Self {
        Self::new()
    }
}

fn echo(query: &DnsMessage, address: Ipv4Addr) -> DnsMessage {
    let answers: Vec<Answer> = query
        .questions
        .iter()
        .map(|q| Answer::single(ResourceRecord::a(q.labels.clone(), 300, address)))
        .collect();
    DnsMessage {
        header: Header {
            qr: true,
            ra: true,
            ancount: answers.len() as u16,
            ..query.header
        },
        questions: query.questions.clone(),
        answers,
    }
}

#[async_trait]
impl UpstreamForwarder for MockForwarder {
    async fn round_trip(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let sub_query = DnsMessage::decode(query)?;
        self.received.lock().unwrap().push(sub_query.clone());

        let name = sub_query
            .questions
            .first()
            .map(Question::name)
            .unwrap_or_default();
        let behaviour = self
            .script
            .lock()
            .unwrap()
            .get(&name)
            .cloned()
            .unwrap_or(Scripted::Answer(Ipv4Addr::new(10, 0, 0, 1)));

        match behaviour {
            Scripted::Answer(address) => echo(&sub_query, address).encode(),
            Scripted::Delayed(address, delay) => {
                tokio::time::sleep(delay).await;
                echo(&sub_query, address).encode()
            }
            Scripted::Reply(mut message) => {
                message.header.id = sub_query.header.id;
                message.encode()
            }
            Scripted::WrongId(address, id) => {
                let mut reply = echo(&sub_query, address);
                reply.header.id = id;
                reply.encode()
            }
            Scripted::Garbage => Ok(vec![0xde, 0xad]),
            Scripted::Fail => Err(DomainError::transport(
                self.upstream(),
                "connection refused",
            )),
            Scripted::Hang => std::future::pending().await,
        }
    }

    fn upstream(&self) -> String {
        "mock:53".to_string()
    }
}

/// A standard query with RD set and one A/IN question per name.
pub fn query(id: u16, names: &[&str]) -> DnsMessage {
    let questions: Vec<Question> = names
        .iter()
        .map(|name| Question::for_name(name, TYPE_A, CLASS_IN))
        .collect();
    DnsMessage {
        header: Header {
            id,
            rd: true,
            qdcount: questions.len() as u16,
            ..Header::default()
        },
        questions,
        answers: Vec::new(),
    }
}
