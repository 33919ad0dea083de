pub mod dns;

pub use dns::{
    combine_responses, respond, split_query, ForwardQueryUseCase, HandleDnsQueryUseCase,
};
