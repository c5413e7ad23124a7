mod lat_lon;
pub use lat_lon::LatLon;

mod map_bounds;
pub use map_bounds::MapBounds;

mod country_extent;
pub use country_extent::{normalize_country_code, CountryExtent};

mod viewport;
pub use viewport::{MapViewport, ScreenSize};

mod city;
pub use city::{preset_cities, City, CITY_ZOOM};
