use super::stub_answer::respond;
use crate::ports::UpstreamForwarder;
use ferrous_relay_domain::{DispatchMode, DnsMessage, DomainError, Header};
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// One single-question sub-query per question of `query`.
///
/// Each sub-query keeps the query's ID and flags and carries exactly one
/// question; every other count is zeroed.
pub fn split_query(query: &DnsMessage) -> Vec<DnsMessage> {
    query
        .questions
        .iter()
        .map(|question| DnsMessage {
            header: Header {
                qdcount: 1,
                ancount: 0,
                nscount: 0,
                arcount: 0,
                ..query.header
            },
            questions: vec![question.clone()],
            answers: Vec::new(),
        })
        .collect()
}

/// Merges per-question sub-responses, given in dispatch order, into one reply.
///
/// The header (ID included) comes from the first sub-response with both
/// QDCOUNT and ANCOUNT set to the number of sub-responses. Authority and
/// additional sections are never carried over, so NSCOUNT and ARCOUNT are
/// zero. Slot `i` takes the
/// question and answer of sub-response `i`; a sub-response that does not carry
/// exactly one of either leaves a zero-value entry in that slot.
pub fn combine_responses(responses: Vec<DnsMessage>) -> DnsMessage {
    let count = responses.len() as u16;
    let header = responses
        .first()
        .map(|first| Header {
            qdcount: count,
            ancount: count,
            nscount: 0,
            arcount: 0,
            ..first.header
        })
        .unwrap_or_default();

    let mut questions = Vec::with_capacity(responses.len());
    let mut answers = Vec::with_capacity(responses.len());

    for (slot, response) in responses.into_iter().enumerate() {
        let qdcount = response.header.qdcount;
        let ancount = response.header.ancount;

        let question = match (qdcount, response.questions.into_iter().next()) {
            (1, Some(question)) => question,
            _ => {
                warn!(slot, qdcount, "Sub-response lacks exactly one question, slot left empty");
                Default::default()
            }
        };
        let answer = match (ancount, response.answers.into_iter().next()) {
            (1, Some(answer)) => answer,
            _ => {
                warn!(slot, ancount, "Sub-response lacks exactly one answer, slot left empty");
                Default::default()
            }
        };

        questions.push(question);
        answers.push(answer);
    }

    DnsMessage {
        header,
        questions,
        answers,
    }
}

/// Forwards a query question by question: split, dispatch, combine.
///
/// Any failing sub-query (transport error, deadline, undecodable reply)
/// fails the whole query; no partial reply is produced.
pub struct ForwardQueryUseCase {
    forwarder: Arc<dyn UpstreamForwarder>,
    timeout: Duration,
    dispatch: DispatchMode,
}

impl ForwardQueryUseCase {
    pub fn new(forwarder: Arc<dyn UpstreamForwarder>, timeout: Duration) -> Self {
        Self {
            forwarder,
            timeout,
            dispatch: DispatchMode::Sequential,
        }
    }

    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn dispatch_mode(&self) -> DispatchMode {
        self.dispatch
    }

    pub fn upstream(&self) -> String {
        self.forwarder.upstream()
    }

    pub async fn execute(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError> {
        if query.questions.is_empty() {
            debug!(id = query.header.id, "Query has no questions, nothing to forward");
            return Ok(respond(query));
        }

        let sub_queries = split_query(query);
        debug!(
            id = query.header.id,
            sub_queries = sub_queries.len(),
            dispatch = self.dispatch.as_str(),
            upstream = %self.forwarder.upstream(),
            "Forwarding split query"
        );

        let responses = match self.dispatch {
            DispatchMode::Sequential => {
                let mut responses = Vec::with_capacity(sub_queries.len());
                for (index, sub_query) in sub_queries.iter().enumerate() {
                    responses.push(self.round_trip(index, sub_query).await?);
                }
                responses
            }
            // Each round trip owns its socket, so identical IDs in flight
            // together never get their replies crossed.
            DispatchMode::Concurrent => {
                try_join_all(
                    sub_queries
                        .iter()
                        .enumerate()
                        .map(|(index, sub_query)| self.round_trip(index, sub_query)),
                )
                .await?
            }
        };

        Ok(combine_responses(responses))
    }

    async fn round_trip(
        &self,
        index: usize,
        sub_query: &DnsMessage,
    ) -> Result<DnsMessage, DomainError> {
        let request = sub_query.encode()?;

        let reply = tokio::time::timeout(self.timeout, self.forwarder.round_trip(&request))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.forwarder.upstream(),
            })??;

        let response = DnsMessage::decode(&reply)?;

        if response.header.id != sub_query.header.id {
            warn!(
                index,
                sent = sub_query.header.id,
                received = response.header.id,
                "Upstream reply ID differs from sub-query ID"
            );
        }

        debug!(
            index,
            id = response.header.id,
            rcode = response.header.rcode,
            answers = response.answers.len(),
            "Sub-query answered"
        );

        Ok(response)
    }
}
