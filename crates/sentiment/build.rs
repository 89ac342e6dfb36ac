fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate the client for the sentiment inference service
    tonic_build::compile_protos("proto/sentiment.proto")?;
    Ok(())
}
