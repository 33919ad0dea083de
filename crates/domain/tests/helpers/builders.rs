#![allow(dead_code)]
use ferrous_relay_domain::{
    Answer, DnsMessage, Header, Question, ResourceRecord, CLASS_IN, TYPE_A,
};
use std::net::Ipv4Addr;

pub struct QueryBuilder {
    header: Header,
    questions: Vec<Question>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            header: Header {
                id: 1234,
                rd: true,
                ..Header::default()
            },
            questions: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.header.id = id;
        self
    }

    pub fn opcode(mut self, opcode: u8) -> Self {
        self.header.opcode = opcode;
        self
    }

    pub fn question(mut self, name: &str) -> Self {
        self.questions
            .push(Question::for_name(name, TYPE_A, CLASS_IN));
        self
    }

    pub fn build(mut self) -> DnsMessage {
        self.header.qdcount = self.questions.len() as u16;
        DnsMessage {
            header: self.header,
            questions: self.questions,
            answers: Vec::new(),
        }
    }
}

/// Response echoing `query` with one A answer per question.
pub fn answered(query: &DnsMessage, address: Ipv4Addr, ttl: u32) -> DnsMessage {
    let answers: Vec<Answer> = query
        .questions
        .iter()
        .map(|q| Answer::single(ResourceRecord::a(q.labels.clone(), ttl, address)))
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
