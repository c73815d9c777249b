// Domain layer: the fixture document tree, raw vendor fixtures and the ports
// the pipeline talks to. Adapters live in crate::adapters.

pub mod fixture;
pub mod model;
pub mod ports;

pub use fixture::{FixtureRequest, RawFixture, RawScore, RawTeam, RawVenue};
pub use model::{Country, League, Match, NavItem, Navigation, Site, SourcePos};
pub use ports::{FixtureClient, Storage};
