use async_trait::async_trait;
use rewriteng_application::ports::{DnsHandler, ResponseWriter};
use rewriteng_domain::{DnsMessage, DomainError, ResourceRecord, ResponseCode};
use std::sync::{Arc, Mutex};

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

enum Reply {
    Answers(Vec<ResourceRecord>),
    Fail(DomainError),
    Nothing,
}

/// Terminal handler that answers every request the same way.
#[derive(Clone)]
pub struct StaticHandler {
    reply: Arc<Reply>,
    received: Arc<Mutex<Vec<DnsMessage>>>,
}

impl StaticHandler {
    pub fn answering(answers: Vec<ResourceRecord>) -> Self {
        Self::with_reply(Reply::Answers(answers))
    }

    pub fn failing_with(error: DomainError) -> Self {
        Self::with_reply(Reply::Fail(error))
    }

    pub fn silent() -> Self {
        Self::with_reply(Reply::Nothing)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply: Arc::new(reply),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn received(&self) -> Vec<DnsMessage> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsHandler for StaticHandler {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn serve_dns(
        &self,
        writer: &mut dyn ResponseWriter,
        request: DnsMessage,
    ) -> Result<ResponseCode, DomainError> {
        self.received.lock().unwrap().push(request.clone());

        match self.reply.as_ref() {
            Reply::Answers(answers) => {
                let mut response = DnsMessage::response_to(&request, ResponseCode::NoError);
                response.answers = answers.clone();
                writer.write_msg(response).await?;
                Ok(ResponseCode::NoError)
            }
            Reply::Fail(error) => Err(error.clone()),
            Reply::Nothing => Ok(ResponseCode::NoError),
        }
    }
}
