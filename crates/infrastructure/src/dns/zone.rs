use hickory_proto::rr::rdata::SOA;
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::ProtoError;
use std::str::FromStr;
use webless_domain::config::ZoneConfig;

/// The zone this server is authoritative for, with its SOA template.
///
/// The SOA record carries our negative-caching TTL in the record TTL
/// field, so a fresh record is minted per response.
pub struct ZoneAuthority {
    origin: Name,
    soa: SOA,
}

impl ZoneAuthority {
    pub fn from_config(zone: &ZoneConfig) -> Result<Self, ProtoError> {
        let origin = Name::from_str(&format!("{}.", zone.suffix))?;
        let mname = Name::from_str(&format!("{}.", zone.primary_ns))?;
        let rname = Name::from_str(&format!("{}.", zone.hostmaster))?;

        let soa = SOA::new(
            mname,
            rname,
            zone.serial,
            zone.refresh as i32,
            zone.retry as i32,
            zone.expire as i32,
            zone.minimum,
        );

        Ok(Self { origin, soa })
    }

    pub fn origin(&self) -> &Name {
        &self.origin
    }

    pub fn soa_record(&self, ttl_secs: u32) -> Record {
        Record::from_rdata(self.origin.clone(), ttl_secs, RData::SOA(self.soa.clone()))
    }
}
