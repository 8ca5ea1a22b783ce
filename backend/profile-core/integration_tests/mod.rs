mod helpers;

mod activation;
mod degraded;
mod host_sync;
