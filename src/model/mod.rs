/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
/// Request dispatch, envelope decoding and raw downloads
pub mod http;
/// Request parameters and bodies
pub mod requests;
/// Response models and envelope helpers
pub mod responses;
