//! IPv4 CIDR arithmetic
//!
//! Worker networks are handled as a 32-bit base address plus a prefix length.
//! Sub-blocks are addressed by an offset from the base address; every carved
//! subnet is checked against its parent before it is handed out.

use std::collections::HashSet;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::HyperscalerError;

/// Smallest supported worker CIDR prefix length
pub const MIN_WORKER_PREFIX_LEN: u8 = 16;

/// Largest supported worker CIDR prefix length
pub const MAX_WORKER_PREFIX_LEN: u8 = 24;

/// Maximum number of zones a worker network can be partitioned into
pub const MAX_ZONES: usize = 8;

/// Bits needed to address up to [`MAX_ZONES`] partitions
pub const ZONE_BITS: u8 = 3;

/// An IPv4 network in CIDR notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Cidr {
    base: u32,
    prefix_len: u8,
}

impl Ipv4Cidr {
    /// Network base address; host bits of the parsed address are cleared
    pub fn base(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.base)
    }

    /// Prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Number of addresses in the block
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix_len))
    }

    /// True when `other` lies completely inside this block
    pub fn contains(&self, other: &Ipv4Cidr) -> bool {
        let start = u64::from(self.base);
        let other_start = u64::from(other.base);
        other.prefix_len >= self.prefix_len
            && other_start >= start
            && other_start + other.size() <= start + self.size()
    }

    /// Sub-block of length `prefix_len` starting `offset` addresses after the base
    ///
    /// Fails with [`HyperscalerError::SubnetOutOfRange`] when the sub-block is not
    /// aligned or does not fit inside this block.
    pub fn subnet(&self, offset: u64, prefix_len: u8) -> Result<Ipv4Cidr, HyperscalerError> {
        let candidate = u32::try_from(u64::from(self.base) + offset)
            .ok()
            .filter(|_| prefix_len <= 32)
            .map(|base| Ipv4Cidr { base, prefix_len });

        match candidate {
            Some(subnet) if self.contains(&subnet) && subnet.is_aligned() => Ok(subnet),
            _ => Err(HyperscalerError::SubnetOutOfRange {
                subnet: format!("{}+{offset}/{prefix_len}", self.base()),
                parent: self.to_string(),
            }),
        }
    }

    /// True when the two blocks share at least one address
    pub fn overlaps(&self, other: &Ipv4Cidr) -> bool {
        let start = u64::from(self.base);
        let other_start = u64::from(other.base);
        start < other_start + other.size() && other_start < start + self.size()
    }

    fn is_aligned(&self) -> bool {
        u64::from(self.base) % self.size() == 0
    }

    fn mask(prefix_len: u8) -> u32 {
        if prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix_len))
        }
    }
}

impl FromStr for Ipv4Cidr {
    type Err = HyperscalerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| HyperscalerError::InvalidCidr {
            cidr: s.to_string(),
            reason: reason.to_string(),
        };

        let (addr, len) = s.trim().split_once('/').ok_or_else(|| invalid("missing prefix length"))?;
        let addr: Ipv4Addr = addr.parse().map_err(|_| invalid("invalid IPv4 address"))?;
        let prefix_len: u8 = len.parse().map_err(|_| invalid("invalid prefix length"))?;
        if prefix_len > 32 {
            return Err(invalid("prefix length exceeds 32"));
        }

        Ok(Ipv4Cidr {
            base: u32::from(addr) & Self::mask(prefix_len),
            prefix_len,
        })
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base(), self.prefix_len)
    }
}

/// Parse a worker CIDR and check its prefix length is in the supported range
pub fn parse_worker_cidr(worker_cidr: &str) -> Result<Ipv4Cidr, HyperscalerError> {
    let cidr: Ipv4Cidr = worker_cidr.parse()?;
    if !(MIN_WORKER_PREFIX_LEN..=MAX_WORKER_PREFIX_LEN).contains(&cidr.prefix_len) {
        return Err(HyperscalerError::UnsupportedPrefixLength {
            cidr: worker_cidr.to_string(),
            prefix_len: cidr.prefix_len,
            min: MIN_WORKER_PREFIX_LEN,
            max: MAX_WORKER_PREFIX_LEN,
        });
    }
    Ok(cidr)
}

/// Check zone names are unique and their count is within `[min, MAX_ZONES]`
pub fn validate_zone_names(zone_names: &[String], min: usize) -> Result<(), HyperscalerError> {
    if zone_names.len() < min || zone_names.len() > MAX_ZONES {
        return Err(HyperscalerError::ZoneCount {
            count: zone_names.len(),
            min,
            max: MAX_ZONES,
        });
    }

    let mut seen = HashSet::new();
    for name in zone_names {
        if !seen.insert(name.as_str()) {
            return Err(HyperscalerError::DuplicateZone(name.clone()));
        }
    }
    Ok(())
}

/// Check that no `added` subnet overlaps a `persisted` one
pub fn ensure_disjoint<'a>(
    persisted: impl IntoIterator<Item = &'a str>,
    added: impl IntoIterator<Item = &'a str>,
) -> Result<(), HyperscalerError> {
    let persisted = persisted
        .into_iter()
        .map(str::parse::<Ipv4Cidr>)
        .collect::<Result<Vec<_>, _>>()?;

    for subnet in added {
        let candidate: Ipv4Cidr = subnet.parse()?;
        if let Some(existing) = persisted.iter().find(|existing| existing.overlaps(&candidate)) {
            return Err(HyperscalerError::SubnetOverlap {
                subnet: candidate.to_string(),
                persisted: existing.to_string(),
            });
        }
    }
    Ok(())
}
