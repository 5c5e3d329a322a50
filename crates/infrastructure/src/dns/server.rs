use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::xfer::Protocol;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use kubezone_application::use_cases::{
    AnswerExternalQueryUseCase, ExternalAnswer, TransferZoneUseCase,
};
use kubezone_domain::DomainError;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Serves the external zones over the DNS wire protocol.
pub struct ExternalDnsHandler {
    answer: Arc<AnswerExternalQueryUseCase>,
    transfer: Arc<TransferZoneUseCase>,
}

impl ExternalDnsHandler {
    pub fn new(answer: Arc<AnswerExternalQueryUseCase>, transfer: Arc<TransferZoneUseCase>) -> Self {
        Self { answer, transfer }
    }

    async fn handle_transfer<R: ResponseHandler>(
        &self,
        request: &Request,
        zone: &Name,
        query_type: RecordType,
        response_handle: &mut R,
    ) -> ResponseInfo {
        if request.protocol() != Protocol::Tcp {
            debug!(zone = %zone, protocol = %request.protocol(), "Zone transfer over non-TCP refused");
            return send_error_response(request, response_handle, ResponseCode::Refused).await;
        }

        let serial = match query_type {
            RecordType::IXFR => requested_serial(request),
            _ => 0,
        };

        let mut stream = match self.transfer.execute(&zone.to_ascii(), serial) {
            Ok(stream) => stream,
            Err(DomainError::NotAuthoritative(zone)) => {
                debug!(zone = %zone, "Transfer requested for unserved zone");
                return send_error_response(request, response_handle, ResponseCode::NotAuth).await;
            }
            Err(e) => {
                error!(error = %e, "Zone transfer failed to start");
                return send_error_response(request, response_handle, ResponseCode::ServFail).await;
            }
        };

        info!(zone = %zone, client = %request.src(), serial, "Zone transfer started");

        let mut last_info = ResponseInfo::from(*request.header());
        let mut messages = 0usize;
        while let Some(batch) = stream.next_batch().await {
            let builder = MessageResponseBuilder::from_message_request(request);
            let mut header = Header::response_from_request(request.header());
            header.set_authoritative(true);
            let response = builder.build(header, batch.iter(), &[], &[], &[]);

            match response_handle.send_response(response).await {
                Ok(info) => last_info = info,
                Err(e) => {
                    warn!(zone = %zone, error = %e, "Zone transfer aborted by client");
                    return last_info;
                }
            }
            messages += 1;
        }

        debug!(zone = %zone, messages, "Zone transfer finished");
        last_info
    }
}

#[async_trait::async_trait]
impl RequestHandler for ExternalDnsHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = request_info.query.original();
        let qname = query.name().clone();
        let qtype = query.query_type();

        debug!(name = %qname, record_type = ?qtype, client = %request.src(), "DNS query received");

        match qtype {
            RecordType::AXFR | RecordType::IXFR => {
                self.handle_transfer(request, &qname, qtype, &mut response_handle)
                    .await
            }
            _ => {
                let answer = self.answer.execute(&qname, qtype);
                send_answer(request, &mut response_handle, answer).await
            }
        }
    }
}

/// Serial of the SOA a client sent along with an IXFR, or 0.
fn requested_serial(request: &Request) -> u32 {
    request
        .name_servers()
        .iter()
        .find_map(|record| match record.data() {
            RData::SOA(soa) => Some(soa.serial()),
            _ => None,
        })
        .unwrap_or(0)
}

async fn send_answer<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    answer: ExternalAnswer,
) -> ResponseInfo {
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_authoritative(answer.response_code != ResponseCode::Refused);
    header.set_response_code(answer.response_code);

    debug!(
        code = ?answer.response_code,
        answers = answer.answers.len(),
        authority = answer.authority.len(),
        additionals = answer.additionals.len(),
        "Sending response"
    );

    let response = builder.build(
        header,
        answer.answers.iter(),
        answer.authority.iter(),
        &[] as &[Record],
        answer.additionals.iter(),
    );

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send response");
            ResponseInfo::from(*request.header())
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
