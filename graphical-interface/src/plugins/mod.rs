mod extent;
pub use extent::ExtentOutline;
