use async_trait::async_trait;
use rewriteng_application::ports::{DnsHandler, ResponseWriter};
use rewriteng_domain::{DnsMessage, DomainError, ResourceRecord, ResponseCode, Section};
use std::sync::{Arc, Mutex};

/// Writer that keeps every message written to it.
#[derive(Default)]
pub struct CollectingWriter {
    pub messages: Vec<DnsMessage>,
}

impl CollectingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(&self) -> &DnsMessage {
        assert_eq!(self.messages.len(), 1, "expected exactly one response");
        &self.messages[0]
    }
}

#[async_trait]
impl ResponseWriter for CollectingWriter {
    async fn write_msg(&mut self, response: DnsMessage) -> Result<(), DomainError> {
        self.messages.push(response);
        Ok(())
    }
}

/// Terminal handler that records the requests it sees and answers with a
/// canned set of records, echoing whatever question it received.
#[derive(Clone, Default)]
pub struct MockNextHandler {
    received: Arc<Mutex<Vec<DnsMessage>>>,
    answers: Arc<Mutex<Vec<ResourceRecord>>>,
    authority: Arc<Mutex<Vec<ResourceRecord>>>,
    additional: Arc<Mutex<Vec<ResourceRecord>>>,
    error: Arc<Mutex<Option<DomainError>>>,
}

impl MockNextHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(self, section: Section, records: Vec<ResourceRecord>) -> Self {
        let slot = match section {
            Section::Answer => &self.answers,
            Section::Authority => &self.authority,
            Section::Additional => &self.additional,
        };
        *slot.lock().unwrap() = records;
        self
    }

    pub fn failing_with(self, error: DomainError) -> Self {
        *self.error.lock().unwrap() = Some(error);
        self
    }

    pub fn received(&self) -> Vec<DnsMessage> {
        self.received.lock().unwrap().clone()
    }

    pub fn last_received(&self) -> DnsMessage {
        self.received
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("next handler was not called")
    }
}

#[async_trait]
impl DnsHandler for MockNextHandler {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn serve_dns(
        &self,
        writer: &mut dyn ResponseWriter,
        request: DnsMessage,
    ) -> Result<ResponseCode, DomainError> {
        self.received.lock().unwrap().push(request.clone());

        let error = self.error.lock().unwrap().clone();
        if let Some(error) = error {
            return Err(error);
        }

        let mut response = DnsMessage::response_to(&request, ResponseCode::NoError);
        response.answers = self.answers.lock().unwrap().clone();
        response.authority = self.authority.lock().unwrap().clone();
        response.additional = self.additional.lock().unwrap().clone();

        writer.write_msg(response).await?;
        Ok(ResponseCode::NoError)
    }
}
