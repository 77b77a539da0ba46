//! Density-based spatial clustering
//!
//! Partitions a (longitude, latitude) scatter into density-connected
//! clusters plus a noise set:
//! - `KdTree`: 2-D spatial index answering the radius queries DBSCAN needs
//! - `dbscan`: the clustering pass itself, labels with noise sentinel -1
//!
//! Neighborhoods are Euclidean in raw degree space. That metric distorts at
//! high latitudes (a degree of longitude shrinks toward the poles); it is
//! kept for output compatibility with the upstream pipeline. See
//! [`DbscanParams::eps`].

pub mod dbscan;
pub mod kdtree;

pub use dbscan::{dbscan, DbscanParams, NOISE};
pub use kdtree::KdTree;
