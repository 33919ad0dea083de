mod forward_query;
mod handle_dns_query;
mod stub_answer;

pub use forward_query::{combine_responses, split_query, ForwardQueryUseCase};
pub use handle_dns_query::HandleDnsQueryUseCase;
pub use stub_answer::{respond, STUB_ADDRESS, STUB_TTL};
