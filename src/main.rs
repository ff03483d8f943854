#[actix_web::main]
async fn main() -> std::io::Result<()> {
    farm_advisory_server::run().await
}
