//! Inventory loading
//!
//! Fetches each requested collection in turn and records how many objects
//! came back. A failure on one collection is recorded and the next one is
//! still attempted.

use clap::ValueEnum;
use nautobot_client::{
    list_resources, Collection, Device, Location, NautobotClientTrait, NautobotError, Rack,
    RackGroup, Resource,
};
use std::io::Write;
use tracing::{error, info};

/// Collections the loader knows how to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    /// `dcim/locations`
    Locations,
    /// `dcim/rack-groups`
    RackGroups,
    /// `dcim/racks`
    Racks,
    /// `dcim/devices`
    Devices,
}

impl ResourceKind {
    /// Collections loaded when none are requested explicitly
    pub const DEFAULT: [Self; 3] = [Self::RackGroups, Self::Racks, Self::Devices];

    /// Record type name, as used in the report
    pub fn kind(self) -> &'static str {
        match self {
            Self::Locations => Location::KIND,
            Self::RackGroups => RackGroup::KIND,
            Self::Racks => Rack::KIND,
            Self::Devices => Device::KIND,
        }
    }

    /// Collection endpoint
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Locations => Location::ENDPOINT,
            Self::RackGroups => RackGroup::ENDPOINT,
            Self::Racks => Rack::ENDPOINT,
            Self::Devices => Device::ENDPOINT,
        }
    }
}

/// Outcome of loading one collection
#[derive(Debug)]
pub struct LoadReport {
    /// Which collection
    pub kind: ResourceKind,
    /// Number of distinct records, or why the load failed
    pub result: Result<usize, NautobotError>,
}

/// Load every requested collection sequentially.
///
/// Always returns one report per requested kind, in request order.
pub async fn load_all<C>(client: &C, kinds: &[ResourceKind]) -> Vec<LoadReport>
where
    C: NautobotClientTrait + ?Sized,
{
    let mut reports = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        let result = load_kind(client, kind).await;
        match &result {
            Ok(count) => info!("Loaded {} {} objects from {}", count, kind.kind(), kind.endpoint()),
            Err(e) => error!("Error loading {} objects from {}: {}", kind.kind(), kind.endpoint(), e),
        }
        reports.push(LoadReport { kind, result });
    }
    reports
}

async fn load_kind<C>(client: &C, kind: ResourceKind) -> Result<usize, NautobotError>
where
    C: NautobotClientTrait + ?Sized,
{
    match kind {
        ResourceKind::Locations => count::<Location, C>(client).await,
        ResourceKind::RackGroups => count::<RackGroup, C>(client).await,
        ResourceKind::Racks => count::<Rack, C>(client).await,
        ResourceKind::Devices => count::<Device, C>(client).await,
    }
}

async fn count<R, C>(client: &C) -> Result<usize, NautobotError>
where
    R: Collection,
    C: NautobotClientTrait + ?Sized,
{
    Ok(list_resources::<R>(client, &[]).await?.len())
}

/// Write one line per report
pub fn write_report(reports: &[LoadReport], out: &mut impl Write) -> std::io::Result<()> {
    for report in reports {
        match &report.result {
            Ok(count) => writeln!(out, "[Init] Loaded {} {} objects.", count, report.kind.kind())?,
            Err(e) => writeln!(out, "[Init] Error loading {} objects: {}", report.kind.kind(), e)?,
        }
    }
    Ok(())
}
