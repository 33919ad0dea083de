use ferrous_relay_domain::{
    Answer, DnsMessage, Header, Question, ResourceRecord, ResponseCode, CLASS_IN, OPCODE_QUERY,
    TYPE_A,
};
use std::net::Ipv4Addr;

/// TTL of every synthesized answer.
pub const STUB_TTL: u32 = 60;

/// Placeholder address returned for every question.
pub const STUB_ADDRESS: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);

/// Answers `query` without resolving anything: one A record pointing at
/// [`STUB_ADDRESS`] per question. A non-standard OPCODE yields NOTIMP.
pub fn respond(query: &DnsMessage) -> DnsMessage {
    let rcode = if query.header.opcode == OPCODE_QUERY {
        ResponseCode::NoError
    } else {
        ResponseCode::NotImplemented
    };

    let count = query.questions.len() as u16;
    let header = Header {
        id: query.header.id,
        qr: true,
        opcode: query.header.opcode,
        aa: false,
        tc: false,
        rd: query.header.rd,
        ra: false,
        z: 0,
        rcode: rcode.as_u8(),
        qdcount: count,
        ancount: count,
        nscount: 0,
        arcount: 0,
    };

    let questions = query
        .questions
        .iter()
        .map(|q| Question::new(q.labels.clone(), TYPE_A, CLASS_IN))
        .collect();

    let answers = query
        .questions
        .iter()
        .map(|q| Answer::single(ResourceRecord::a(q.labels.clone(), STUB_TTL, STUB_ADDRESS)))
        .collect();

    DnsMessage {
        header,
        questions,
        answers,
    }
}
