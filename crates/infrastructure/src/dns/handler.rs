use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error};
use webless_application::ResolveQueryUseCase;
use webless_domain::verdict::{Resolution, Verdict};

use crate::dns::zone::ZoneAuthority;

/// Answers A queries for the verdict zone.
///
/// A valid email domain gets NXDOMAIN, an invalid one gets an A record
/// pointing at 127.0.0.1, and queries we cannot interpret get FORMERR.
/// Negative responses carry the zone SOA so resolvers cache them for
/// the verdict TTL.
#[derive(Clone)]
pub struct WeblessRequestHandler {
    resolve: Arc<ResolveQueryUseCase>,
    zone: Arc<ZoneAuthority>,
}

impl WeblessRequestHandler {
    pub fn new(resolve: Arc<ResolveQueryUseCase>, zone: Arc<ZoneAuthority>) -> Self {
        Self { resolve, zone }
    }

    /// NXDOMAIN and FORMERR responses: no answers, SOA in the authority
    /// section carrying the verdict TTL.
    async fn send_negative<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: &mut R,
        code: ResponseCode,
        ttl_secs: u32,
    ) -> ResponseInfo {
        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = *request.header();
        header.set_response_code(code);
        header.set_authoritative(true);

        let soa = [self.zone.soa_record(ttl_secs)];
        let response = builder.build(header, &[], &[], soa.iter(), &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send negative response");
                ResponseInfo::from(*request.header())
            }
        }
    }

    /// NOERROR response with a single A record pointing at localhost.
    async fn send_localhost_answer<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: &mut R,
        raw_query: &str,
        ttl_secs: u32,
    ) -> ResponseInfo {
        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = *request.header();
        header.set_authoritative(true);

        let name = Name::from_str(raw_query).unwrap_or_else(|_| Name::root());
        let answers = [Record::from_rdata(
            name,
            ttl_secs,
            RData::A(A(Ipv4Addr::LOCALHOST)),
        )];
        let response = builder.build(header, answers.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send answer response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

#[async_trait::async_trait]
impl RequestHandler for WeblessRequestHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                let fallback = Resolution::malformed();
                return self
                    .send_negative(
                        request,
                        &mut response_handle,
                        ResponseCode::FormErr,
                        fallback.ttl_secs(),
                    )
                    .await;
            }
        };

        let query = &request_info.query;
        if query.query_type() != RecordType::A {
            debug!(
                query = %query.name().to_utf8(),
                record_type = ?query.query_type(),
                "Unsupported record type"
            );
            return send_error_response(request, &mut response_handle, ResponseCode::NotImp).await;
        }

        let raw_query = query.name().to_utf8();
        let query_id = request.header().id();
        let resolution = self.resolve.execute(query_id, &raw_query);

        match resolution.verdict {
            Verdict::Valid => {
                self.send_negative(
                    request,
                    &mut response_handle,
                    ResponseCode::NXDomain,
                    resolution.ttl_secs(),
                )
                .await
            }
            Verdict::Invalid => {
                self.send_localhost_answer(
                    request,
                    &mut response_handle,
                    &raw_query,
                    resolution.ttl_secs(),
                )
                .await
            }
            Verdict::MalformedQuery => {
                self.send_negative(
                    request,
                    &mut response_handle,
                    ResponseCode::FormErr,
                    resolution.ttl_secs(),
                )
                .await
            }
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
    let mut header = *request.header();
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
