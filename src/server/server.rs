use std::io::{BufReader, Read, Write};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex};

use log::{error, warn};
use mio::net::TcpStream;

use crate::common::header::{CONNECTION, HeaderMapOps};
use crate::common::request::Request;
use crate::common::response::Response;
use crate::common::version::HTTP_VERSION_1_1;
use crate::server::config::Config;
use crate::server::connection::{Connection, ReadRequestError};
use crate::server::connection::ReadRequestResult::{Closed, Error, NotReady, Ready};
use crate::server::nonblocking_buf_writer::NonBlockingBufWriter;
use crate::server::poll::listen;
use crate::server::router::ListenerResult::{Next, SendResponse, SendResponseArc};
use crate::server::router::Router;
use crate::util::stream;
use crate::util::stream::{BufStream, Stream};
use crate::util::thread_pool::ThreadPool;

/// Raw bytes for a request parsing error response.
const REQUEST_PARSING_ERROR_RESPONSE: &[u8; 28] = b"HTTP/1.1 400 Bad Request\r\n\r\n";

/// Raw bytes for the uniform not-found response. Written when no listener
/// claims a request or when a listener panics.
const NOT_FOUND_RESPONSE: &[u8] =
    b"HTTP/1.1 404 Not Found\r\ncontent-type: text/html\r\ncontent-length: 29\r\n\r\n<h1>404 - File Not Found</h1>";

/// Size of connection read buffers.
const READ_BUF_SIZE: usize = 4096;

/// Size of connection write buffers.
const WRITE_BUF_SIZE: usize = 4096;

/// Starts an HTTP server. This function blocks.
pub fn listen_http(config: Config) -> std::io::Result<()> {
    listen_abstract(config, |stream| stream)
}

/// Starts the server with the given config, and uses the given on_new_connection function to get streams for the incoming connections.
fn listen_abstract<T: Stream + Send + 'static>(config: Config, on_new_connection: impl Fn(TcpStream) -> T) -> std::io::Result<()> {
    let addr = config.addr.parse().expect("Invalid socket address");
    let thread_pool = ThreadPool::new(config.connection_handler_threads);

    let config = Arc::new(config);

    listen(addr,
           |socket, addr| {
               let stream = on_new_connection(socket);
               let stream = new_buffered_stream(stream);
               let connection = Connection::new(addr, stream);
               Arc::new(Mutex::new(Some(connection)))
           },
           |connection| {
               let connection = connection.clone();
               let config = config.clone();
               thread_pool.execute(move || handle_io_ready_connection(config, connection));
           })
}

/// Wraps the stream with a buffered reader and writer.
fn new_buffered_stream(stream: impl Stream + 'static) -> impl BufStream {
    fn buf_reader<R: Read>(reader: R) -> BufReader<R> {
        BufReader::with_capacity(READ_BUF_SIZE, reader)
    }

    fn buf_writer<W: Write>(writer: W) -> NonBlockingBufWriter<W> {
        NonBlockingBufWriter::with_capacity(WRITE_BUF_SIZE, writer)
    }

    stream::with_buf_reader_and_writer(stream, buf_reader, buf_writer)
}

/// Tries reading requests and responding for the given connection. May drop the given connection if it should be closed.
fn handle_io_ready_connection<T: BufStream>(config: Arc<Config>, connection: Arc<Mutex<Option<Connection<T>>>>) {
    let mut lock = connection.lock().unwrap();

    if let Some(mut connection) = lock.take() {
        // first try to flush any existing unflushed data
        if connection.flush().is_err() { // if we cant flush assume the connection is bad
            return;
        }

        // try to read requests and write responses
        let should_close = respond_to_requests(&mut connection, &config.router);

        // put the connection back in the Option if we should keep it alive
        if !should_close {
            lock.replace(connection);
        }
    }
}

/// Responds to requests in the given connection using the given router. Returns true if the connection should be dropped.
fn respond_to_requests<T: BufStream>(connection: &mut Connection<T>, router: &Router) -> bool {
    loop {
        match connection.read_request() {
            Ready(request) => {
                let write_result = write_response_from_router(connection, router, &request);
                if write_result.is_err() || should_close_after_response(&request) { return true; }
            }
            NotReady => return false,
            Closed => return true,
            Error(error) => {
                write_error_response(connection, error).unwrap_or_default();
                return true;
            }
        }
    }
}

/// Gets a response from the router and writes it. If the router has no response, or a listener
/// panics while producing one, then the uniform not-found response is written instead. A panic
/// is terminal for the request only, never for the server.
fn write_response_from_router(writer: &mut impl Write, router: &Router, request: &Request) -> std::io::Result<()> {
    match catch_unwind(AssertUnwindSafe(|| router.result(request))) {
        Ok(SendResponse(response)) => write_response(writer, &response),
        Ok(SendResponseArc(response)) => write_response(writer, &response),
        Ok(Next) => writer.write_all(NOT_FOUND_RESPONSE).and_then(|_| writer.flush()),
        Err(_) => {
            error!("listener panicked while handling {}", request.path);
            writer.write_all(NOT_FOUND_RESPONSE).and_then(|_| writer.flush())
        }
    }
}

/// Writes a response to the given request parsing error.
fn write_error_response(writer: &mut impl Write, error: ReadRequestError) -> std::io::Result<()> {
    warn!("could not read request: {:?}", error);
    writer.write_all(REQUEST_PARSING_ERROR_RESPONSE)?;
    writer.flush()
}

/// Checks if the given connection should be closed after a response is sent to the given request.
fn should_close_after_response(request: &Request) -> bool {
    request.headers.contains_header_value(&CONNECTION, "close")
}

/// Writes the response as bytes to the given writer.
pub fn write_response(writer: &mut impl Write, response: &Response) -> std::io::Result<()> {
    // write! will call write multiple times and does not flush
    write!(writer, "{} {} {}\r\n", HTTP_VERSION_1_1, response.status.code, response.status.reason)?;
    for (header, values) in response.headers.iter() {
        for value in values {
            write!(writer, "{}: {}\r\n", header, value)?;
        }
    }
    writer.write_all(b"\r\n")?;
    writer.write_all(&response.body)?;
    writer.flush()?;
    Ok(())
}
